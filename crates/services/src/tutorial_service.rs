use std::sync::Arc;

use bio_core::model::GameKind;
use storage::TutorialFlagRepository;

use crate::error::TutorialError;

/// One-time onboarding prompts, remembered per game.
#[derive(Clone)]
pub struct TutorialService {
    flags: Arc<dyn TutorialFlagRepository>,
}

impl TutorialService {
    #[must_use]
    pub fn new(flags: Arc<dyn TutorialFlagRepository>) -> Self {
        Self { flags }
    }

    /// Whether `game` should open with its tutorial.
    ///
    /// # Errors
    ///
    /// Returns `TutorialError::Storage` if the flag cannot be read.
    pub fn should_show(&self, game: GameKind) -> Result<bool, TutorialError> {
        Ok(!self.flags.tutorial_hidden(game)?)
    }

    /// Close the tutorial. The choice is only stored when the player opts out
    /// of seeing it again.
    ///
    /// # Errors
    ///
    /// Returns `TutorialError::Storage` if the flag cannot be written.
    pub fn dismiss(&self, game: GameKind, dont_show_again: bool) -> Result<(), TutorialError> {
        if dont_show_again {
            self.flags.set_tutorial_hidden(game, true)?;
            tracing::debug!(%game, "tutorial hidden");
        }
        Ok(())
    }

    /// Show the tutorial again next time.
    ///
    /// # Errors
    ///
    /// Returns `TutorialError::Storage` if the flag cannot be cleared.
    pub fn restore(&self, game: GameKind) -> Result<(), TutorialError> {
        self.flags.set_tutorial_hidden(game, false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryStore;

    #[test]
    fn dismiss_without_opt_out_keeps_showing() {
        let tutorials = TutorialService::new(Arc::new(InMemoryStore::new()));
        assert!(tutorials.should_show(GameKind::WhoAmI).unwrap());

        tutorials.dismiss(GameKind::WhoAmI, false).unwrap();
        assert!(tutorials.should_show(GameKind::WhoAmI).unwrap());

        tutorials.dismiss(GameKind::WhoAmI, true).unwrap();
        assert!(!tutorials.should_show(GameKind::WhoAmI).unwrap());
        assert!(tutorials.should_show(GameKind::Levers).unwrap());

        tutorials.restore(GameKind::WhoAmI).unwrap();
        assert!(tutorials.should_show(GameKind::WhoAmI).unwrap());
    }
}
