//! Answer tables used when the wizard runs unattended.

use crate::answers::RawAnswers;
use crate::catalog::MobilePlatform;
use crate::intent::{Intent, LaunchFlags};
use crate::result::InitResult;

const WEB_DEFAULTS: &str = include_str!("defaults/web.json");
const MOBILE_DEFAULTS: &str = include_str!("defaults/mobile.json");

/// Precomputed answers for non-interactive runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsTable {
    /// Web-only defaults
    pub web: RawAnswers,
    /// Defaults including mobile browsers
    pub mobile: RawAnswers,
}

impl DefaultsTable {
    /// Parse the embedded tables
    pub fn load() -> InitResult<Self> {
        Ok(Self {
            web: RawAnswers::from_json(WEB_DEFAULTS)?,
            mobile: RawAnswers::from_json(MOBILE_DEFAULTS)?,
        })
    }

    /// Answers for an unattended run with the given flags
    #[must_use]
    pub fn answers_for(&self, flags: &LaunchFlags) -> RawAnswers {
        let intent = Intent::from_flags(flags);
        let mut raw = if intent.is_some() {
            self.mobile.clone()
        } else {
            self.web.clone()
        };

        if !flags.browsers.is_empty() {
            raw.browsers = Some(flags.browsers.clone());
            // re-derived from the chosen browsers during refinement
            if raw.mobile == Some(true) {
                raw.mobile_browsers = None;
            }
        }

        if let Some(intent) = intent {
            raw.testing_type = Some(intent.testing_types());
            if intent.app && !intent.web {
                raw.browsers = Some(Vec::new());
                raw.mobile_browsers = Some(Vec::new());
                raw.mobile_platform.get_or_insert(MobilePlatform::Android);
            }
            intent.seed(&mut raw);
        }
        raw
    }
}
