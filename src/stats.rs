//! Health and damage numbers shared by the player, enemies and spikes.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct CharacterStats {
  pub max_health: u32,
  pub current_health: u32,
  pub damage: u32,
  pub defence: u32,
}

impl CharacterStats {
  pub fn new(max_health: u32, damage: u32, defence: u32) -> Self {
    Self {
      max_health,
      current_health: max_health,
      damage,
      defence,
    }
  }

  /// Stats for something that only deals damage, like a spike.
  pub fn attacker(damage: u32) -> Self {
    Self::new(1, damage, 0)
  }

  pub fn is_dead(&self) -> bool {
    self.current_health == 0
  }
}

/// Applies one hit from `attacker` to `defender` and returns the damage dealt.
///
/// Defence is subtracted from the attacker's damage; health never drops
/// below zero.
pub fn take_damage(attacker: &CharacterStats, defender: &mut CharacterStats) -> u32 {
  let dealt = attacker.damage.saturating_sub(defender.defence);
  defender.current_health = defender.current_health.saturating_sub(dealt);
  dealt
}
