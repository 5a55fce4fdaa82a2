//! Integration tests for the trainer simulation
//!
//! These tests drive `Simulation` through intents and fixed 60 Hz frames and
//! check:
//! - Windup, dash-cancel and recovery timing
//! - Pierce pass-through and stack transfer
//! - Rend detonation, rejections and cooldown resets
//! - Hostile mode and resets

use bevy::math::Vec2;
use hoptrainer::trainer::{
    ActorState, CastKind, DashDirection, IntentRejection, Simulation, TrainerCue, TrainerIntent,
    TrainerSettings, Tuning, UnitHandle, UnitKind,
};

const FRAME: f32 = 1.0 / 60.0;
const RATIO: f32 = 250.0 / 525.0;

fn trainer() -> Simulation {
    Simulation::new(Tuning::default(), TrainerSettings::default())
}

/// Trainer with the actor moved to `position`.
fn trainer_at(position: Vec2) -> Simulation {
    let mut sim = trainer();
    let actor = sim.actor_mut();
    actor.position = position;
    actor.destination = position;
    sim
}

fn run(sim: &mut Simulation, seconds: f32) {
    let frames = (seconds / FRAME).round() as usize;
    for _ in 0..frames {
        sim.advance(FRAME);
    }
}

fn minion(sim: &Simulation, kind: UnitKind, slot: usize) -> UnitHandle {
    sim.formation_unit(kind, slot).expect("minion alive")
}

// =============================================================================
// Basic Attack Tests
// =============================================================================

#[test]
fn test_forward_dash_cancels_windup() {
    let mut sim = trainer_at(Vec2::new(1120.0, 250.0));

    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();
    assert_eq!(sim.actor().state, ActorState::Casting(CastKind::BasicAttack));

    sim.apply(TrainerIntent::MoveTo(Vec2::new(1120.0, 400.0))).unwrap();
    let queued = sim.actor().queued_dash.expect("dash queued during windup");
    assert_eq!(queued.direction, DashDirection::Forward);
    assert_eq!(
        sim.actor().state,
        ActorState::Casting(CastKind::BasicAttack),
        "Queueing a dash must not change state"
    );

    run(&mut sim, 0.5);
    assert_eq!(sim.actor().state, ActorState::Casting(CastKind::BasicAttack));

    run(&mut sim, 0.05);
    assert_eq!(sim.actor().state, ActorState::Dashing);
    assert_eq!(sim.score().hits, 1);
    assert_eq!(sim.snapshot().basic_bolts.len(), 1, "Bolt leaves as the dash starts");

    let dash_speed = 180.0 * RATIO / 0.25;
    assert!((sim.actor().dash_velocity.length() - dash_speed).abs() < 1e-2);

    let cues = sim.drain_cues();
    assert!(cues.contains(&TrainerCue::BoltLaunched));
    assert!(cues.contains(&TrainerCue::Dash));
}

#[test]
fn test_dash_covers_table_distance() {
    let start = Vec2::new(1120.0, 250.0);
    let mut sim = trainer_at(start);

    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();
    sim.apply(TrainerIntent::MoveTo(Vec2::new(1120.0, 400.0))).unwrap();
    run(&mut sim, 1.0);

    assert_eq!(sim.actor().state, ActorState::Idle);
    let travelled = sim.actor().position.distance(start);
    let expected = 180.0 * RATIO;
    assert!(
        (travelled - expected).abs() < 6.0,
        "Dash travelled {} (expected ~{})",
        travelled,
        expected
    );
}

#[test]
fn test_uncancelled_attack_is_a_miss() {
    let mut sim = trainer_at(Vec2::new(1120.0, 250.0));

    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();
    run(&mut sim, 0.6);

    assert_eq!(sim.actor().state, ActorState::Cooldown);
    assert_eq!(sim.score().misses, 1);
    assert_eq!(sim.score().hits, 0);
    assert!(sim.snapshot().floating_texts.iter().any(|t| t.text == "No Hop"));

    // Recovery is 1/as - windup, about 0.92s
    run(&mut sim, 0.95);
    assert_eq!(sim.actor().state, ActorState::Idle);
}

#[test]
fn test_basic_bolt_lands_and_stacks() {
    let mut sim = trainer_at(Vec2::new(1120.0, 250.0));

    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();
    run(&mut sim, 2.0);

    let champion = sim.units().champion();
    assert!(sim.snapshot().basic_bolts.is_empty(), "Bolt resolved within its life");
    assert_eq!(champion.rend.count(), 1);
    assert!((champion.damage_taken - 90.0).abs() < 1e-3);
    assert_eq!(champion.health, champion.max_health, "The dummy never loses health");
    assert!((sim.score().total_damage - 90.0).abs() < 1e-3);
    assert!(sim.score().in_combat);
}

#[test]
fn test_bolt_fizzles_when_windup_target_dies() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let tuning = sim.tuning().clone();
    let melee = minion(&sim, UnitKind::MeleeMinion, 1);
    let target = sim.unit_mut(melee).unwrap();
    target.health = 50.0;
    target.rend.add(1, &tuning);

    sim.apply(TrainerIntent::Attack(melee)).unwrap();
    assert_eq!(sim.actor().state, ActorState::Casting(CastKind::BasicAttack));

    // Rend kills the minion before the windup finishes
    sim.apply(TrainerIntent::CastBurst).unwrap();
    assert!(sim.unit(melee).is_none());

    run(&mut sim, 1.5);

    assert!(sim.drain_cues().contains(&TrainerCue::BoltLaunched));
    assert!(sim.snapshot().basic_bolts.is_empty());
    let champion = sim.units().champion();
    assert_eq!(champion.damage_taken, 0.0, "Bolt must not redirect to the dummy");
    assert_eq!(champion.rend.count(), 0);
    assert!((sim.score().total_damage - 75.0).abs() < 1e-3, "Only the Rend landed");
}

#[test]
fn test_bolt_dropped_when_target_dies_in_flight() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let tuning = sim.tuning().clone();
    let melee = minion(&sim, UnitKind::MeleeMinion, 1);

    sim.apply(TrainerIntent::Attack(melee)).unwrap();
    run(&mut sim, 0.55);
    assert_eq!(sim.snapshot().basic_bolts.len(), 1, "Bolt is still travelling");

    let target = sim.unit_mut(melee).unwrap();
    target.health = 50.0;
    target.rend.add(1, &tuning);
    sim.apply(TrainerIntent::CastBurst).unwrap();
    assert!(sim.unit(melee).is_none());

    run(&mut sim, 1.0);

    assert!(sim.snapshot().basic_bolts.is_empty());
    assert_eq!(sim.units().champion().damage_taken, 0.0);
    assert!((sim.score().total_damage - 75.0).abs() < 1e-3);
}

#[test]
fn test_basic_bolt_expires_after_lifetime() {
    let mut tuning = Tuning::default();
    tuning.bolt_speed = 10.0;
    let mut sim = Simulation::new(tuning, TrainerSettings::default());
    let actor = sim.actor_mut();
    actor.position = Vec2::new(1120.0, 250.0);
    actor.destination = actor.position;

    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();
    run(&mut sim, 1.5);
    assert_eq!(sim.snapshot().basic_bolts.len(), 1, "Slow bolt still in flight");

    run(&mut sim, 1.2);

    assert!(sim.snapshot().basic_bolts.is_empty(), "Bolt expired after 2s");
    assert_eq!(sim.units().champion().damage_taken, 0.0);
    assert_eq!(sim.units().champion().rend.count(), 0);
}

#[test]
fn test_far_attack_walks_into_range() {
    let mut sim = trainer();

    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();

    assert_eq!(sim.actor().state, ActorState::Walking);
    assert!(sim.actor().attack_moving);
    assert!(sim.snapshot().floating_texts.iter().any(|t| t.text == "Approaching..."));
}

#[test]
fn test_attack_move_picks_nearest_unit() {
    let mut sim = trainer();
    let middle_melee = minion(&sim, UnitKind::MeleeMinion, 1);

    sim.apply(TrainerIntent::AttackMove(Vec2::new(1120.0, 450.0))).unwrap();
    run(&mut sim, 1.5);

    assert_eq!(sim.actor().attack_target, Some(middle_melee));
    assert_eq!(sim.actor().state, ActorState::Casting(CastKind::BasicAttack));
}

#[test]
fn test_stop_cancels_windup() {
    let mut sim = trainer_at(Vec2::new(1120.0, 250.0));

    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();
    sim.apply(TrainerIntent::Stop).unwrap();

    assert_eq!(sim.actor().state, ActorState::Idle);
    run(&mut sim, 1.0);
    assert!(sim.snapshot().basic_bolts.is_empty(), "No bolt after a stop");
    assert_eq!(sim.score().misses, 0);
}

#[test]
fn test_walk_arrives_at_destination() {
    let mut sim = trainer();
    let destination = Vec2::new(600.0, 450.0);

    sim.apply(TrainerIntent::MoveTo(destination)).unwrap();
    run(&mut sim, 1.0);

    assert_eq!(sim.actor().state, ActorState::Idle);
    assert!(sim.actor().position.distance(destination) < 5.0);
}

// =============================================================================
// Pierce Tests
// =============================================================================

#[test]
fn test_pierce_kills_two_minions_and_transfers_stacks() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let melee = minion(&sim, UnitKind::MeleeMinion, 1);
    let caster = minion(&sim, UnitKind::CasterMinion, 0);
    sim.unit_mut(melee).unwrap().health = 100.0;
    sim.unit_mut(caster).unwrap().health = 100.0;

    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1120.0, 450.0) }).unwrap();
    assert_eq!(sim.actor().state, ActorState::Casting(CastKind::Pierce));

    run(&mut sim, 1.0);

    assert!(sim.unit(melee).is_none(), "Melee minion should be dead");
    assert!(sim.unit(caster).is_none(), "Caster minion should be dead");
    assert_eq!(sim.score().minions_killed, 2);
    assert_eq!(
        sim.units().champion().rend.count(),
        3,
        "Own stack plus one per minion killed"
    );
    assert!(sim.pierce_cooldown() > 0.0);
}

#[test]
fn test_pierce_stops_on_surviving_minion() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let melee = minion(&sim, UnitKind::MeleeMinion, 1);
    let caster = minion(&sim, UnitKind::CasterMinion, 0);

    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1120.0, 450.0) }).unwrap();
    run(&mut sim, 1.0);

    let struck = sim.unit(melee).expect("survives 115 damage");
    assert!((struck.health - (465.0 - 115.0)).abs() < 1e-3);
    assert_eq!(struck.rend.count(), 1);
    assert_eq!(sim.unit(caster).unwrap().health, 284.0, "Spear stopped at the first minion");
    assert_eq!(sim.units().champion().rend.count(), 0);
}

#[test]
fn test_pierce_cue_fires_on_launch() {
    let mut sim = trainer_at(Vec2::new(700.0, 300.0));

    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1500.0, 100.0) }).unwrap();
    assert!(!sim.drain_cues().contains(&TrainerCue::PierceCast), "Nothing thrown yet");

    run(&mut sim, 0.3);

    assert!(sim.drain_cues().contains(&TrainerCue::PierceCast));
    assert_eq!(sim.snapshot().pierce_bolts.len(), 1);
}

#[test]
fn test_overlapping_minions_latest_spawned_is_struck() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let melee = minion(&sim, UnitKind::MeleeMinion, 1);
    let caster = minion(&sim, UnitKind::CasterMinion, 0);
    let spot = sim.unit(melee).unwrap().position;
    sim.unit_mut(caster).unwrap().position = spot;

    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1120.0, 450.0) }).unwrap();
    run(&mut sim, 1.0);

    assert!((sim.unit(caster).unwrap().health - (284.0 - 115.0)).abs() < 1e-3);
    assert_eq!(sim.unit(melee).unwrap().health, 465.0, "Spear stopped on the caster");
}

#[test]
fn test_pierce_cooldown_rejects_recast() {
    let mut sim = trainer_at(Vec2::new(700.0, 300.0));
    let aim = Vec2::new(1500.0, 100.0);

    sim.apply(TrainerIntent::CastPierce { aim }).unwrap();
    run(&mut sim, 0.3);

    assert_eq!(
        sim.apply(TrainerIntent::CastPierce { aim }),
        Err(IntentRejection::OnCooldown)
    );
    run(&mut sim, 1.0);
    assert!(sim.apply(TrainerIntent::CastPierce { aim }).is_ok());
}

#[test]
fn test_pierce_during_windup_is_busy() {
    let mut sim = trainer_at(Vec2::new(1120.0, 250.0));

    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();
    let result = sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1120.0, 450.0) });

    assert_eq!(result, Err(IntentRejection::Busy));
    assert_eq!(sim.actor().state, ActorState::Casting(CastKind::BasicAttack));
    assert_eq!(sim.log().rejections().get(&IntentRejection::Busy), Some(&1));
}

#[test]
fn test_pierce_aimed_at_self_has_no_target() {
    let position = Vec2::new(700.0, 300.0);
    let mut sim = trainer_at(position);

    let result = sim.apply(TrainerIntent::CastPierce { aim: position });

    assert_eq!(result, Err(IntentRejection::NoTarget));
    assert_eq!(sim.actor().state, ActorState::Idle);
    assert_eq!(sim.pierce_cooldown(), 0.0);
    assert_eq!(sim.log().rejections().get(&IntentRejection::NoTarget), Some(&1));
}

#[test]
fn test_pierce_dash_always_goes_long() {
    let mut sim = trainer_at(Vec2::new(700.0, 300.0));

    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1500.0, 100.0) }).unwrap();
    sim.apply(TrainerIntent::MoveTo(Vec2::new(900.0, 350.0))).unwrap();
    assert_eq!(
        sim.actor().queued_dash.map(|d| d.direction),
        Some(DashDirection::Forward)
    );

    run(&mut sim, 0.27);

    assert_eq!(sim.actor().state, ActorState::Dashing);
    let long_dash_speed = 280.0 * RATIO / 0.25;
    assert!((sim.actor().dash_velocity.length() - long_dash_speed).abs() < 1e-2);
    assert_eq!(sim.score().hits, 1);
}

#[test]
fn test_stop_ignored_while_casting_pierce() {
    let mut sim = trainer_at(Vec2::new(700.0, 300.0));

    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1500.0, 100.0) }).unwrap();
    sim.apply(TrainerIntent::Stop).unwrap();

    assert_eq!(sim.actor().state, ActorState::Casting(CastKind::Pierce));
}

#[test]
fn test_dash_is_clamped_to_arena() {
    let mut sim = trainer_at(Vec2::new(40.0, 450.0));

    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(400.0, 450.0) }).unwrap();
    sim.apply(TrainerIntent::MoveTo(Vec2::new(0.0, 450.0))).unwrap();
    run(&mut sim, 0.6);

    assert_eq!(sim.actor().position.x, 25.0);
}

// =============================================================================
// Rend Tests
// =============================================================================

#[test]
fn test_rend_without_stacks_is_rejected() {
    let mut sim = trainer();
    assert_eq!(sim.apply(TrainerIntent::CastBurst), Err(IntentRejection::NoStacks));
    assert_eq!(sim.rend_cooldown(), 0.0);
}

#[test]
fn test_rend_out_of_range() {
    let mut sim = trainer();
    let tuning = sim.tuning().clone();
    sim.unit_mut(UnitHandle::Champion).unwrap().rend.add(2, &tuning);

    assert_eq!(sim.apply(TrainerIntent::CastBurst), Err(IntentRejection::OutOfRange));
    assert_eq!(sim.units().champion().rend.count(), 2, "Rejected Rend keeps stacks");
}

#[test]
fn test_rend_detonates_every_stacked_unit() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let tuning = sim.tuning().clone();
    let melee = minion(&sim, UnitKind::MeleeMinion, 0);
    sim.unit_mut(UnitHandle::Champion).unwrap().rend.add(1, &tuning);
    sim.unit_mut(melee).unwrap().rend.add(2, &tuning);

    sim.apply(TrainerIntent::CastBurst).unwrap();

    assert!((sim.units().champion().damage_taken - 75.0).abs() < 1e-3);
    assert!((sim.unit(melee).unwrap().health - (465.0 - 105.0)).abs() < 1e-3);
    assert_eq!(sim.units().champion().rend.count(), 0);
    assert_eq!(sim.unit(melee).unwrap().rend.count(), 0);
    assert_eq!(sim.rend_cooldown(), 10.0, "No kill, full cooldown");
    assert!(sim.drain_cues().contains(&TrainerCue::Burst));

    assert_eq!(sim.apply(TrainerIntent::CastBurst), Err(IntentRejection::OnCooldown));
}

#[test]
fn test_rend_kill_resets_cooldown() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let tuning = sim.tuning().clone();
    let caster = minion(&sim, UnitKind::CasterMinion, 2);
    sim.unit_mut(UnitHandle::Champion).unwrap().rend.add(1, &tuning);
    let target = sim.unit_mut(caster).unwrap();
    target.health = 100.0;
    target.rend.add(3, &tuning);

    sim.apply(TrainerIntent::CastBurst).unwrap();

    assert!(sim.unit(caster).is_none());
    assert_eq!(sim.rend_cooldown(), 0.0);
    assert!(sim.snapshot().floating_texts.iter().any(|t| t.text == "Reset!"));
}

#[test]
fn test_rend_uses_level_cooldown() {
    let mut settings = TrainerSettings::default();
    settings.rend_level = 5;
    let mut sim = Simulation::new(Tuning::default(), settings);
    let tuning = sim.tuning().clone();
    let actor = sim.actor_mut();
    actor.position = Vec2::new(900.0, 450.0);
    sim.unit_mut(UnitHandle::Champion).unwrap().rend.add(1, &tuning);

    sim.apply(TrainerIntent::CastBurst).unwrap();

    assert_eq!(sim.rend_cooldown(), 8.0);
}

#[test]
fn test_pending_rend_fires_when_spear_lands() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let tuning = sim.tuning().clone();
    let melee = minion(&sim, UnitKind::MeleeMinion, 1);
    let caster = minion(&sim, UnitKind::CasterMinion, 0);
    sim.unit_mut(melee).unwrap().health = 100.0;
    sim.unit_mut(caster).unwrap().health = 100.0;
    sim.unit_mut(UnitHandle::Champion).unwrap().rend.add(1, &tuning);

    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1120.0, 450.0) }).unwrap();
    run(&mut sim, 0.27);
    assert_eq!(sim.snapshot().pierce_bolts.len(), 1);

    // Rend while the spear flies: the champion's stack pops now, the spear's
    // own stacks pop when it lands
    sim.apply(TrainerIntent::CastBurst).unwrap();
    assert!(sim.snapshot().pierce_bolts[0].rend_pending);
    let after_cast = sim.units().champion().damage_taken;
    assert!((after_cast - 75.0).abs() < 1e-3);

    run(&mut sim, 0.7);

    let champion = sim.units().champion();
    assert_eq!(champion.rend.count(), 0, "Pending Rend consumed the transferred stacks");
    // Spear 115 plus a 3-stack Rend (the spear's own stack plus two transferred)
    assert!((champion.damage_taken - (75.0 + 115.0 + 135.0)).abs() < 1e-3);
}

#[test]
fn test_pending_rend_kill_on_minion_resets_cooldown() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let tuning = sim.tuning().clone();
    let melee = minion(&sim, UnitKind::MeleeMinion, 1);
    // Survives the spear (115) but not the follow-up 1-stack Rend (75)
    sim.unit_mut(melee).unwrap().health = 150.0;
    sim.unit_mut(UnitHandle::Champion).unwrap().rend.add(1, &tuning);

    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1120.0, 450.0) }).unwrap();
    run(&mut sim, 0.27);
    sim.apply(TrainerIntent::CastBurst).unwrap();
    assert_eq!(sim.rend_cooldown(), 10.0);

    run(&mut sim, 0.7);

    assert!(sim.unit(melee).is_none(), "Pending Rend finished the minion");
    assert_eq!(sim.rend_cooldown(), 0.0);
    assert_eq!(sim.score().minions_killed, 1);
    assert!(
        (sim.units().champion().damage_taken - 75.0).abs() < 1e-3,
        "Spear never reached the champion"
    );
}

#[test]
fn test_stacks_decay_after_timer() {
    let mut sim = trainer();
    let tuning = sim.tuning().clone();
    sim.unit_mut(UnitHandle::Champion).unwrap().rend.add(5, &tuning);

    run(&mut sim, 3.9);
    assert_eq!(sim.units().champion().rend.count(), 5);

    run(&mut sim, 0.2);
    assert_eq!(sim.units().champion().rend.count(), 0);
}

// =============================================================================
// Stale Handle Tests
// =============================================================================

#[test]
fn test_attack_on_dead_minion_is_ignored() {
    let mut sim = trainer_at(Vec2::new(700.0, 450.0));
    let melee = minion(&sim, UnitKind::MeleeMinion, 1);
    sim.unit_mut(melee).unwrap().health = 100.0;
    sim.apply(TrainerIntent::CastPierce { aim: Vec2::new(1120.0, 450.0) }).unwrap();
    run(&mut sim, 1.0);
    assert!(sim.unit(melee).is_none());

    assert!(sim.apply(TrainerIntent::Attack(melee)).is_ok());
    assert_eq!(sim.actor().state, ActorState::Idle);
}

#[test]
fn test_reset_invalidates_old_handles() {
    let mut sim = trainer();
    let old = minion(&sim, UnitKind::CasterMinion, 0);

    sim.reset(false);

    assert!(sim.unit(old).is_none());
    assert!(sim.formation_unit(UnitKind::CasterMinion, 0).is_some());
}

// =============================================================================
// Hostile Mode & Reset Tests
// =============================================================================

#[test]
fn test_hostile_champion_chases_and_snaps_home() {
    let mut sim = trainer();
    let home = sim.units().champion().position;

    sim.apply(TrainerIntent::ToggleHostile).unwrap();
    assert!(sim.is_hostile());
    run(&mut sim, 1.0);
    assert!(sim.units().champion().position.x < home.x, "Champion walks at the player");

    sim.apply(TrainerIntent::ToggleHostile).unwrap();
    assert_eq!(sim.units().champion().position, home);
}

#[test]
fn test_hostile_champion_hurts_player() {
    let mut sim = trainer_at(Vec2::new(1050.0, 450.0));

    sim.apply(TrainerIntent::ToggleHostile).unwrap();
    run(&mut sim, 1.1);

    let expected = 1000.0 - 60.0 * 100.0 / 124.0;
    assert!((sim.actor().health - expected).abs() < 1e-2, "health {}", sim.actor().health);
    assert!(sim.drain_cues().contains(&TrainerCue::PlayerHurt));
}

#[test]
fn test_player_death_triggers_full_reset() {
    let mut settings = TrainerSettings::default();
    settings.enemy_ad = 10_000.0;
    let mut sim = Simulation::new(Tuning::default(), settings);
    sim.apply(TrainerIntent::ToggleHostile).unwrap();

    run(&mut sim, 5.0);

    assert_eq!(sim.player_deaths(), 1);
    assert_eq!(sim.actor().health, sim.actor().max_health);
    let cues = sim.drain_cues();
    assert!(cues.contains(&TrainerCue::PlayerDied));
    assert!(cues.contains(&TrainerCue::Reset));
}

#[test]
fn test_full_reset_clears_session() {
    let mut sim = trainer_at(Vec2::new(1120.0, 250.0));
    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();
    run(&mut sim, 2.0);
    assert_eq!(sim.score().misses, 1);
    assert!(sim.units().champion().damage_taken > 0.0);

    sim.apply(TrainerIntent::Reset).unwrap();

    assert_eq!(sim.score().misses, 0);
    assert_eq!(sim.score().total_damage, 0.0);
    assert_eq!(sim.units().champion().damage_taken, 0.0);
    assert!(
        sim.actor().position.abs_diff_eq(Vec2::new(480.0, 450.0), 1e-3),
        "Actor back on spawn, got {:?}",
        sim.actor().position
    );
    assert_eq!(sim.units().champion().rend.count(), 0);
    assert_eq!(sim.units().minion_count(), 6);
    assert!(sim.drain_cues().contains(&TrainerCue::Reset));
}

#[test]
fn test_dps_uses_combat_clock() {
    let mut sim = trainer_at(Vec2::new(1120.0, 250.0));
    sim.apply(TrainerIntent::Attack(UnitHandle::Champion)).unwrap();
    run(&mut sim, 2.0);

    let score = sim.score();
    assert!((score.combat_time - 2.0).abs() < 0.05);
    assert!((score.dps() - 45.0).abs() < 1.5, "dps {}", score.dps());
}

#[test]
fn test_snapshot_serializes() {
    let sim = trainer();
    let json = serde_json::to_string(&sim.snapshot()).expect("snapshot serializes");
    assert!(json.contains("\"state\":\"IDLE\""));
}
