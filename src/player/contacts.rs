//! Turns rapier collision messages into controller state.
//!
//! Ground-check overlaps feed [`GroundContacts`], spike overlaps feed
//! [`SpikeOverlaps`] and touching an enemy produces a [`HazardContact`]
//! straight away.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  ControllerRig, Dead, Enemy, GroundCheck, GroundContacts, Player, Spike, SpikeOverlaps,
};
use super::damage::{HazardContact, HazardKind};

pub fn track_contacts(
  mut collisions: MessageReader<CollisionEvent>,
  mut ground_checks: Query<&mut GroundContacts, With<GroundCheck>>,
  mut players: Query<&mut SpikeOverlaps, With<Player>>,
  enemies: Query<(), With<Enemy>>,
  spikes: Query<(), With<Spike>>,
  mut hazards: MessageWriter<HazardContact>,
) {
  for event in collisions.read() {
    let (a, b, started) = match *event {
      CollisionEvent::Started(a, b, _) => (a, b, true),
      CollisionEvent::Stopped(a, b, _) => (a, b, false),
    };

    // Either collider may be ours, so look at the pair both ways round.
    for (own, other) in [(a, b), (b, a)] {
      if let Ok(mut contacts) = ground_checks.get_mut(own) {
        if started {
          contacts.0.insert(other);
        } else {
          contacts.0.remove(&other);
        }
        continue;
      }

      let Ok(mut overlaps) = players.get_mut(own) else {
        continue;
      };
      if spikes.contains(other) {
        if started {
          overlaps.0.insert(other);
        } else {
          overlaps.0.remove(&other);
        }
      } else if started && enemies.contains(other) {
        hazards.write(HazardContact {
          player: own,
          attacker: other,
          kind: HazardKind::Enemy,
        });
      }
    }
  }
}

/// Spikes hurt on every physics tick the player spends inside them.
pub fn emit_spike_contacts(
  players: Query<(Entity, &SpikeOverlaps), (With<ControllerRig>, Without<Dead>)>,
  mut hazards: MessageWriter<HazardContact>,
) {
  for (player, overlaps) in &players {
    for &spike in overlaps.0.iter() {
      hazards.write(HazardContact {
        player,
        attacker: spike,
        kind: HazardKind::Spike,
      });
    }
  }
}
