use std::rc::Rc;

use space_invaders::consts::*;
use space_invaders::sprite::*;
use space_invaders::GameError;

#[test]
fn same_reference_yields_same_handle() {
    let mut store = SpriteStore::new();
    assert!(store.is_empty());
    let a = store.get(ALIEN_SPRITE).unwrap();
    let b = store.get(ALIEN_SPRITE).unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(store.len(), 1);
}

#[test]
fn builtin_sprites_have_pixel_sizes() {
    let mut store = SpriteStore::new();
    for reference in [SHIP_SPRITE, ALIEN_SPRITE, SHOT_SPRITE] {
        let sprite = store.get(reference).unwrap();
        assert_eq!(sprite.reference(), reference);
        assert!(sprite.width() > 0);
        assert!(sprite.height() > 0);
        assert!(!sprite.glyphs().is_empty());
    }
    // aliens must fit inside their grid cell
    let alien = store.get(ALIEN_SPRITE).unwrap();
    assert!((alien.width() as f64) < ALIEN_SPACING_X);
    assert!((alien.height() as f64) < ALIEN_SPACING_Y);
}

#[test]
fn unknown_reference_fails() {
    let mut store = SpriteStore::new();
    let err = store.get("sprites/missing.gif").unwrap_err();
    assert_eq!(err, SpriteError::NotFound("sprites/missing.gif".to_string()));
    assert_eq!(err.to_string(), "can't find sprite ref: sprites/missing.gif");
    assert!(store.is_empty());
}

#[test]
fn sprite_errors_convert_into_game_errors() {
    let err: GameError = SpriteError::NotFound("x".to_string()).into();
    assert!(matches!(err, GameError::Sprite(_)));
    assert_eq!(err.to_string(), "asset error: can't find sprite ref: x");
}
