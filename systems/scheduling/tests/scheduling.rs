use std::time::Duration;

use mole_rush_core::{Command, Difficulty, Event, HoleId};
use mole_rush_system_scheduling::{Config, Scheduling};
use mole_rush_world::{self as world, query, World};

fn start_session(world: &mut World, duration_secs: u32) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::StartSession { duration_secs }, &mut events);
    events
}

/// Advances one frame: applies a tick, then lets the scheduler react to the
/// full frame batch, applying whatever it emits.
fn run_frame(world: &mut World, scheduling: &mut Scheduling, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);
    pump(world, scheduling, &mut events);
    events
}

fn pump(world: &mut World, scheduling: &mut Scheduling, events: &mut Vec<Event>) {
    let mut commands = Vec::new();
    let holes: Vec<HoleId> = query::holes(world).to_vec();
    scheduling.handle(events, &holes, query::remaining_secs(world), &mut commands);
    for command in commands {
        world::apply(world, command, events);
    }
}

#[test]
fn consecutive_cycles_use_different_holes() {
    let mut world = World::new();
    let mut scheduling = Scheduling::new(Config::new(Difficulty::Normal, 0xD1CE));

    let mut events = start_session(&mut world, 600);
    pump(&mut world, &mut scheduling, &mut events);

    let mut shown = Vec::new();
    for event in &events {
        if let Event::MoleShown { hole, .. } = event {
            shown.push(*hole);
        }
    }

    // Normal difficulty hides after exactly one second, so whole-second
    // frames drive one full cycle each.
    for _ in 0..200 {
        let frame_events = run_frame(&mut world, &mut scheduling, Duration::from_secs(1));
        for event in &frame_events {
            if let Event::MoleShown { hole, .. } = event {
                shown.push(*hole);
            }
        }
    }

    assert!(shown.len() > 100, "expected many cycles, saw {}", shown.len());
    for pair in shown.windows(2) {
        assert_ne!(pair[0], pair[1], "two consecutive moles shared a hole");
    }
}

#[test]
fn at_most_one_mole_is_ever_visible() {
    let mut world = World::new();
    let mut scheduling = Scheduling::new(Config::new(Difficulty::Hard, 7));

    let mut events = start_session(&mut world, 600);
    pump(&mut world, &mut scheduling, &mut events);

    let mut visible = 0usize;
    let mut track = |events: &[Event]| {
        for event in events {
            match event {
                Event::MoleShown { .. } => {
                    visible += 1;
                    assert_eq!(visible, 1, "second mole shown while one was visible");
                }
                Event::MoleHidden { .. } => {
                    visible = visible.checked_sub(1).expect("hide without a visible mole");
                }
                _ => {}
            }
        }
    };
    track(&events);

    for _ in 0..500 {
        let frame_events = run_frame(&mut world, &mut scheduling, Duration::from_millis(100));
        track(&frame_events);
    }
}

#[test]
fn every_hide_pairs_with_its_own_show() {
    let mut world = World::new();
    let mut scheduling = Scheduling::new(Config::new(Difficulty::Hard, 99));

    let mut events = start_session(&mut world, 600);
    pump(&mut world, &mut scheduling, &mut events);

    let mut open_cycle = None;
    let mut observe = |events: &[Event]| {
        for event in events {
            match event {
                Event::MoleShown { cycle, .. } => open_cycle = Some(*cycle),
                Event::MoleHidden { cycle, .. } => {
                    assert_eq!(open_cycle.take(), Some(*cycle), "hide crossed cycles");
                }
                _ => {}
            }
        }
    };
    observe(&events);

    for _ in 0..400 {
        let frame_events = run_frame(&mut world, &mut scheduling, Duration::from_millis(73));
        observe(&frame_events);
    }
}

#[test]
fn stopping_mid_cycle_cancels_the_pending_hide() {
    let mut world = World::new();
    let mut scheduling = Scheduling::new(Config::new(Difficulty::Easy, 5));

    let mut events = start_session(&mut world, 10);
    pump(&mut world, &mut scheduling, &mut events);
    assert!(query::visible_mole(&world).is_some());

    // Stop while the mole is still up; the world hides it and the scheduler
    // drops its handle.
    let mut stop_events = Vec::new();
    world::apply(&mut world, Command::StopSession, &mut stop_events);
    pump(&mut world, &mut scheduling, &mut stop_events);
    assert!(query::visible_mole(&world).is_none());
    assert!(scheduling.pending_cycle().is_none());

    // Enough time for the cancelled cycle's hide to have fired; nothing may
    // toggle visibility again.
    for _ in 0..10 {
        let frame_events = run_frame(&mut world, &mut scheduling, Duration::from_secs(1));
        assert!(
            frame_events.is_empty(),
            "activity observed after stop: {frame_events:?}"
        );
    }
}

#[test]
fn expired_countdown_ends_the_loop_after_the_final_hide() {
    let mut world = World::new();
    let mut scheduling = Scheduling::new(Config::new(Difficulty::Normal, 21));

    let mut events = start_session(&mut world, 1);
    pump(&mut world, &mut scheduling, &mut events);

    // Drain the countdown before the cycle completes.
    let mut countdown_events = Vec::new();
    world::apply(&mut world, Command::AdvanceCountdown, &mut countdown_events);
    pump(&mut world, &mut scheduling, &mut countdown_events);
    assert_eq!(query::remaining_secs(&world), 0);

    let frame_events = run_frame(&mut world, &mut scheduling, Duration::from_secs(1));
    assert!(frame_events
        .iter()
        .any(|event| matches!(event, Event::MoleHidden { .. })));
    assert!(frame_events
        .iter()
        .any(|event| matches!(event, Event::SessionStopped)));
    assert!(scheduling.pending_cycle().is_none());
    assert!(!query::is_running(&world));
}
