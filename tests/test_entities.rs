use std::rc::Rc;

use space_invaders::consts::*;
use space_invaders::entities::*;
use space_invaders::sprite::{Sprite, SpriteStore};

fn sprite(reference: &str) -> Rc<Sprite> {
    SpriteStore::new().get(reference).unwrap()
}

fn alien_at(x: f64, y: f64) -> Entity {
    Entity::alien(sprite(ALIEN_SPRITE), x, y)
}

fn ship_at(x: f64, y: f64) -> Entity {
    Entity::ship(sprite(SHIP_SPRITE), x, y)
}

fn shot_at(x: f64, y: f64) -> Entity {
    Entity::shot(sprite(SHOT_SPRITE), x, y)
}

// ── Constructors ──────────────────────────────────────────────────────────────

#[test]
fn constructors_set_kind_and_velocity() {
    let ship = ship_at(370.0, 550.0);
    assert_eq!(ship.kind, EntityKind::Ship);
    assert_eq!((ship.dx, ship.dy), (0.0, 0.0));

    let alien = alien_at(100.0, 50.0);
    assert_eq!(alien.kind, EntityKind::Alien);
    assert_eq!((alien.dx, alien.dy), (-75.0, 0.0));

    let shot = shot_at(380.0, 520.0);
    assert_eq!(shot.kind, EntityKind::Shot);
    assert_eq!((shot.dx, shot.dy), (0.0, -300.0));
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn movement_accumulates_sub_pixel_steps() {
    let mut alien = alien_at(400.0, 50.0);
    let mut events = Vec::new();

    // 1 ms at 75 px/s is 0.075 px and must not be rounded away
    alien.move_by(1, &mut events);
    assert!((alien.x - 399.925).abs() < 1e-9);

    let mut expected = alien.x;
    for delta in [16u64, 17, 3, 33, 10, 10, 1] {
        alien.move_by(delta, &mut events);
        expected += delta as f64 * -75.0 / 1000.0;
    }
    assert_eq!(alien.x, expected);
    assert_eq!(alien.y, 50.0);
    assert!(events.is_empty());
}

#[test]
fn ship_refuses_to_pass_left_wall() {
    let mut ship = ship_at(9.0, 550.0);
    ship.dx = -SHIP_SPEED;
    let mut events = Vec::new();
    ship.move_by(100, &mut events);
    assert_eq!(ship.x, 9.0);
    assert!(events.is_empty());
}

#[test]
fn ship_refuses_to_pass_right_wall() {
    let mut ship = ship_at(751.0, 550.0);
    ship.dx = SHIP_SPEED;
    ship.move_by(100, &mut Vec::new());
    assert_eq!(ship.x, 751.0);
}

#[test]
fn ship_can_leave_a_wall_the_other_way() {
    let mut ship = ship_at(9.0, 550.0);
    ship.dx = SHIP_SPEED;
    ship.move_by(100, &mut Vec::new());
    assert_eq!(ship.x, 39.0);

    let mut ship = ship_at(751.0, 550.0);
    ship.dx = -SHIP_SPEED;
    ship.move_by(100, &mut Vec::new());
    assert_eq!(ship.x, 721.0);
}

#[test]
fn alien_at_left_wall_flags_logic_but_keeps_moving() {
    let mut alien = alien_at(9.0, 50.0);
    let mut events = Vec::new();
    alien.move_by(100, &mut events);
    assert_eq!(events, vec![FrameEvent::LogicRequired]);
    assert!((alien.x - 1.5).abs() < 1e-9);
    // direction only changes in the logic pass
    assert_eq!(alien.dx, -75.0);
}

#[test]
fn alien_at_right_wall_flags_logic() {
    let mut alien = alien_at(751.0, 50.0);
    alien.dx = 75.0;
    let mut events = Vec::new();
    alien.move_by(10, &mut events);
    assert_eq!(events, vec![FrameEvent::LogicRequired]);
}

#[test]
fn alien_leaving_a_wall_does_not_flag() {
    let mut alien = alien_at(9.0, 50.0);
    alien.dx = 75.0;
    let mut events = Vec::new();
    alien.move_by(10, &mut events);
    assert!(events.is_empty());
}

#[test]
fn shot_off_the_top_requests_its_removal() {
    let mut shot = shot_at(200.0, -99.0);
    let mut events = Vec::new();
    shot.move_by(10, &mut events);
    assert_eq!(shot.y, -102.0);
    assert_eq!(events, vec![FrameEvent::Remove(shot.id())]);
}

#[test]
fn shot_on_screen_stays() {
    let mut shot = shot_at(200.0, 300.0);
    let mut events = Vec::new();
    shot.move_by(100, &mut events);
    assert_eq!(shot.y, 270.0);
    assert!(events.is_empty());
}

// ── Logic ─────────────────────────────────────────────────────────────────────

#[test]
fn do_logic_reverses_and_drops_aliens_only() {
    let mut alien = alien_at(9.0, 50.0);
    alien.do_logic();
    assert_eq!(alien.dx, 75.0);
    assert_eq!(alien.y, 60.0);

    let mut ship = ship_at(370.0, 550.0);
    ship.dx = SHIP_SPEED;
    ship.do_logic();
    assert_eq!(ship.dx, SHIP_SPEED);
    assert_eq!(ship.y, 550.0);
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[test]
fn overlap_is_symmetric() {
    let alien = alien_at(100.0, 50.0);
    let shot = shot_at(110.0, 60.0);
    assert!(alien.collides_with(&shot));
    assert!(shot.collides_with(&alien));
}

#[test]
fn touching_edges_do_not_collide() {
    // alien is 28 px wide: its right edge is at x = 128
    let alien = alien_at(100.0, 50.0);
    let shot = shot_at(128.0, 50.0);
    assert!(!alien.collides_with(&shot));
    assert!(!shot.collides_with(&alien));
}

#[test]
fn bounds_use_truncated_positions() {
    let alien = alien_at(100.0, 50.0);
    // 127.9 truncates to 127, one pixel inside the alien
    let shot = shot_at(127.9, 50.0);
    assert_eq!(shot.bounds(), (127, 50, 6, 16));
    assert!(alien.collides_with(&shot));
}

#[test]
fn far_apart_entities_do_not_collide() {
    let ship = ship_at(370.0, 550.0);
    let alien = alien_at(100.0, 50.0);
    assert!(!ship.collides_with(&alien));
}

#[test]
fn shot_hitting_alien_removes_both_and_reports_kill() {
    let alien = alien_at(100.0, 50.0);
    let shot = shot_at(110.0, 60.0);
    let mut events = Vec::new();

    shot.collided_with(&alien, &mut events);
    alien.collided_with(&shot, &mut events);

    assert_eq!(
        events,
        vec![
            FrameEvent::Remove(shot.id()),
            FrameEvent::Remove(alien.id()),
            FrameEvent::AlienKilled(alien.id()),
        ]
    );
}

#[test]
fn ship_touching_alien_is_destroyed() {
    let ship = ship_at(370.0, 550.0);
    let alien = alien_at(370.0, 550.0);
    let mut events = Vec::new();
    ship.collided_with(&alien, &mut events);
    alien.collided_with(&ship, &mut events);
    assert_eq!(events, vec![FrameEvent::ShipDestroyed]);
}

#[test]
fn harmless_pairs_produce_no_events() {
    let ship = ship_at(370.0, 550.0);
    let shot = shot_at(370.0, 550.0);
    let alien_a = alien_at(100.0, 50.0);
    let alien_b = alien_at(100.0, 50.0);
    let mut events = Vec::new();

    ship.collided_with(&shot, &mut events);
    shot.collided_with(&ship, &mut events);
    alien_a.collided_with(&alien_b, &mut events);
    shot.collided_with(&shot_at(0.0, 0.0), &mut events);

    assert!(events.is_empty());
}
