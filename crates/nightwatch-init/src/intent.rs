//! Launch intent: what kind of testing the run is for.
//!
//! Command-line flags and the testing-type answer are reduced to one
//! [`Intent`] before refinement. Flag combinations only ever touch the raw
//! answers here, in [`Intent::seed`], never inside question definitions.

use crate::answers::RawAnswers;
use crate::catalog::{Backend, Browser, TestingType};
use serde::{Deserialize, Serialize};

/// Command-line choices that shape a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchFlags {
    /// Skip all questions and use the defaults table
    pub non_interactive: bool,
    /// Browsers chosen on the command line
    pub browsers: Vec<Browser>,
    /// Only write the config file; no examples, no packages
    pub config_only: bool,
    /// Target mobile browsers as well
    pub mobile: bool,
    /// Target native mobile apps
    pub native: bool,
}

impl LaunchFlags {
    /// Create default flags (interactive, web only)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set non-interactive mode
    #[must_use]
    pub const fn with_non_interactive(mut self, non_interactive: bool) -> Self {
        self.non_interactive = non_interactive;
        self
    }

    /// Set the browser list
    #[must_use]
    pub fn with_browsers(mut self, browsers: Vec<Browser>) -> Self {
        self.browsers = browsers;
        self
    }

    /// Set config-only mode
    #[must_use]
    pub const fn with_config_only(mut self, config_only: bool) -> Self {
        self.config_only = config_only;
        self
    }

    /// Set mobile targeting
    #[must_use]
    pub const fn with_mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    /// Set native app targeting
    #[must_use]
    pub const fn with_native(mut self, native: bool) -> Self {
        self.native = native;
        self
    }
}

/// Fully determined testing intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Web testing (end-to-end or component)
    pub web: bool,
    /// Native app testing
    pub app: bool,
    /// Mobile devices are in scope
    pub mobile: bool,
}

impl Intent {
    /// Intent implied by a set of answers.
    ///
    /// No testing type at all means plain web testing.
    #[must_use]
    pub fn of(raw: &RawAnswers) -> Self {
        let app = raw.has_testing_type(TestingType::App);
        let web = raw.testing_type.as_ref().map_or(true, |types| {
            types.is_empty()
                || types
                    .iter()
                    .any(|t| matches!(t, TestingType::E2e | TestingType::Component))
        });
        Self {
            web,
            app,
            mobile: app || raw.mobile == Some(true),
        }
    }

    /// Intent fixed by command-line flags, if any
    #[must_use]
    pub const fn from_flags(flags: &LaunchFlags) -> Option<Self> {
        if !flags.mobile && !flags.native {
            return None;
        }
        Some(Self {
            web: flags.mobile || !flags.native,
            app: flags.native,
            mobile: true,
        })
    }

    /// Testing types matching this intent
    #[must_use]
    pub fn testing_types(self) -> Vec<TestingType> {
        let mut types = Vec::new();
        if self.web {
            types.push(TestingType::E2e);
        }
        if self.app {
            types.push(TestingType::App);
        }
        types
    }

    /// Fold this intent into raw answers; fields already answered are kept
    pub fn seed(self, raw: &mut RawAnswers) {
        if raw.testing_type.is_none() {
            raw.testing_type = Some(self.testing_types());
        }
        if raw.mobile.is_none() {
            raw.mobile = Some(self.mobile);
        }
        if self.app && !self.web {
            // app-only runs still need a local appium backend, but no desktop browsers
            raw.backend.get_or_insert(Backend::Local);
            raw.browsers.get_or_insert_with(Vec::new);
            raw.mobile_browsers.get_or_insert_with(Vec::new);
        }
    }
}

/// Raw answers pre-filled from command-line flags, before any question is asked
#[must_use]
pub fn seed_from_flags(flags: &LaunchFlags) -> RawAnswers {
    let mut raw = RawAnswers::new();
    if !flags.browsers.is_empty() {
        raw.browsers = Some(flags.browsers.clone());
    }
    if let Some(intent) = Intent::from_flags(flags) {
        intent.seed(&mut raw);
    }
    raw
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_of_empty_answers_is_web() {
        let intent = Intent::of(&RawAnswers::new());
        assert!(intent.web);
        assert!(!intent.app);
        assert!(!intent.mobile);
    }

    #[test]
    fn test_app_testing_implies_mobile() {
        let raw = RawAnswers::new().with_testing_type(vec![TestingType::App]);
        let intent = Intent::of(&raw);
        assert!(!intent.web);
        assert!(intent.app);
        assert!(intent.mobile);
    }

    #[test]
    fn test_mobile_answer() {
        let raw = RawAnswers::new()
            .with_testing_type(vec![TestingType::E2e])
            .with_mobile(true);
        let intent = Intent::of(&raw);
        assert!(intent.web && intent.mobile && !intent.app);
    }

    #[test]
    fn test_from_flags_none_without_mobile_or_native() {
        assert!(Intent::from_flags(&LaunchFlags::new()).is_none());
    }

    #[test]
    fn test_from_flags_native_only() {
        let intent = Intent::from_flags(&LaunchFlags::new().with_native(true)).unwrap();
        assert_eq!(
            intent,
            Intent {
                web: false,
                app: true,
                mobile: true
            }
        );
        assert_eq!(intent.testing_types(), vec![TestingType::App]);
    }

    #[test]
    fn test_from_flags_mobile_and_native() {
        let flags = LaunchFlags::new().with_mobile(true).with_native(true);
        let intent = Intent::from_flags(&flags).unwrap();
        assert_eq!(
            intent.testing_types(),
            vec![TestingType::E2e, TestingType::App]
        );
    }

    #[test]
    fn test_seed_app_only_forces_local_without_browsers() {
        let raw = seed_from_flags(&LaunchFlags::new().with_native(true));
        assert_eq!(raw.backend, Some(Backend::Local));
        assert_eq!(raw.browsers, Some(vec![]));
        assert_eq!(raw.mobile_browsers, Some(vec![]));
        assert_eq!(raw.mobile, Some(true));
    }

    #[test]
    fn test_seed_keeps_existing_answers() {
        let mut raw = RawAnswers::new()
            .with_testing_type(vec![TestingType::Component])
            .with_mobile(false);
        Intent::from_flags(&LaunchFlags::new().with_mobile(true))
            .unwrap()
            .seed(&mut raw);
        assert_eq!(raw.testing_type, Some(vec![TestingType::Component]));
        assert_eq!(raw.mobile, Some(false));
    }

    #[test]
    fn test_seed_from_flags_browsers() {
        let flags = LaunchFlags::new().with_browsers(vec![Browser::Firefox]);
        let raw = seed_from_flags(&flags);
        assert_eq!(raw.browsers, Some(vec![Browser::Firefox]));
        assert!(raw.testing_type.is_none());
        assert!(raw.mobile.is_none());
    }
}
