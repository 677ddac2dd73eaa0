use bevy::prelude::Entity;

/// The player entity is missing a piece the controller cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
  MissingGroundCheck { player: Entity },
  MissingVisual { player: Entity },
  MissingStats { player: Entity },
}

impl std::fmt::Display for ControllerError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingGroundCheck { player } => {
        write!(f, "player {:?} has no ground check child", player)
      }
      Self::MissingVisual { player } => {
        write!(f, "player {:?} has no visual child with a sprite", player)
      }
      Self::MissingStats { player } => write!(f, "player {:?} has no character stats", player),
    }
  }
}

impl std::error::Error for ControllerError {}
