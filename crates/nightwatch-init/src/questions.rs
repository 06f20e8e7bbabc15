//! Question flow: the ordered questions the wizard asks.
//!
//! Each question carries a visibility predicate, a default and a validator,
//! all plain functions of the answers accumulated so far. The prompt engine
//! sits behind [`Prompter`]; it renders a [`Prompt`] and keeps re-asking
//! until [`Prompt::validate`] accepts the answer.

use crate::answers::{join_path, RawAnswers};
use crate::catalog::{
    choices_of, Backend, Browser, Catalog, CatalogId, Choice, CloudProvider, LanguageRunner,
    MobilePlatform, TestingType, UiFramework,
};
use crate::intent::Intent;
use crate::refine::{DEFAULT_TESTS_LOCATION, FEATURES_FOLDER};
use crate::result::{InitError, InitResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown when a multi-select is left empty
pub const SELECT_AT_LEAST_ONE: &str = "Please select at least one option.";

/// Message shown when a required input is left empty
pub const VALUE_REQUIRED: &str = "Please enter a value.";

/// Default base URL for end-to-end testing
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Default base URL for component testing (Vite dev server)
pub const DEFAULT_COMPONENT_BASE_URL: &str = "http://localhost:5173";

/// Identifies a question and the answer field it fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionId {
    /// Kinds of testing
    TestingType,
    /// Language and runner variant
    LanguageRunnerSetup,
    /// UI framework for component testing
    UiFramework,
    /// Local / remote / both
    Backend,
    /// Cloud grid provider
    CloudProvider,
    /// Local Selenium Server
    SeleniumServer,
    /// Local desktop browsers
    Browsers,
    /// Remote grid browsers
    RemoteBrowsers,
    /// Mobile targeting
    Mobile,
    /// Mobile browsers
    MobileBrowsers,
    /// Mobile platform for app testing
    MobilePlatform,
    /// Test source folder
    TestsLocation,
    /// Cucumber feature folder
    FeaturePath,
    /// Base URL
    BaseUrl,
    /// Anonymous metrics consent
    AllowAnonymousMetrics,
}

impl QuestionId {
    /// Answer key in camelCase
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TestingType => "testingType",
            Self::LanguageRunnerSetup => "languageRunnerSetup",
            Self::UiFramework => "uiFramework",
            Self::Backend => "backend",
            Self::CloudProvider => "cloudProvider",
            Self::SeleniumServer => "seleniumServer",
            Self::Browsers => "browsers",
            Self::RemoteBrowsers => "remoteBrowsers",
            Self::Mobile => "mobile",
            Self::MobileBrowsers => "mobileBrowsers",
            Self::MobilePlatform => "mobilePlatform",
            Self::TestsLocation => "testsLocation",
            Self::FeaturePath => "featurePath",
            Self::BaseUrl => "baseUrl",
            Self::AllowAnonymousMetrics => "allowAnonymousMetrics",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a question is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Free text
    Input,
    /// Yes / no
    Confirm,
    /// One of a list
    Select,
    /// Any number of a list
    MultiSelect,
}

/// An answer returned by the prompt engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    /// Free text
    Text(String),
    /// Yes / no
    Flag(bool),
    /// A single choice id
    Choice(String),
    /// Several choice ids
    Choices(Vec<String>),
}

impl Answer {
    /// Multi-select answer from catalog values
    #[must_use]
    pub fn choices<T: CatalogId>(values: &[T]) -> Self {
        Self::Choices(values.iter().map(|v| v.id().to_string()).collect())
    }

    /// Single-select answer from a catalog value
    #[must_use]
    pub fn choice<T: CatalogId>(value: T) -> Self {
        Self::Choice(value.id().to_string())
    }
}

type Predicate = fn(&RawAnswers) -> bool;
type DefaultFn = fn(&Catalog, &RawAnswers) -> Option<Answer>;
type ChoicesFn = fn(&Catalog, &RawAnswers) -> Vec<Choice>;
type Validator = fn(&Answer) -> Result<(), String>;

/// One question of the flow
#[derive(Clone)]
pub struct Question {
    /// Question id
    pub id: QuestionId,
    /// Presentation
    pub kind: QuestionKind,
    /// Text shown to the user
    pub message: &'static str,
    when: Predicate,
    default: DefaultFn,
    choices: ChoicesFn,
    validate: Validator,
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Question {
    /// Whether the question applies to the answers so far
    #[must_use]
    pub fn is_visible(&self, answers: &RawAnswers) -> bool {
        (self.when)(answers)
    }

    /// Default answer given the answers so far
    #[must_use]
    pub fn default_answer(&self, catalog: &Catalog, answers: &RawAnswers) -> Option<Answer> {
        (self.default)(catalog, answers)
    }

    /// Choices offered given the answers so far
    #[must_use]
    pub fn choices(&self, catalog: &Catalog, answers: &RawAnswers) -> Vec<Choice> {
        (self.choices)(catalog, answers)
    }

    /// Check an answer
    pub fn validate(&self, answer: &Answer) -> Result<(), String> {
        (self.validate)(answer)
    }

    /// Whether the answer field is already filled (seeded by flags or defaults)
    #[must_use]
    pub fn is_answered(&self, answers: &RawAnswers) -> bool {
        match self.id {
            QuestionId::TestingType => answers.testing_type.is_some(),
            QuestionId::LanguageRunnerSetup => answers.language_runner_setup.is_some(),
            QuestionId::UiFramework => answers.ui_framework.is_some(),
            QuestionId::Backend => answers.backend.is_some(),
            QuestionId::CloudProvider => answers.cloud_provider.is_some(),
            QuestionId::SeleniumServer => answers.selenium_server.is_some(),
            QuestionId::Browsers => answers.browsers.is_some(),
            QuestionId::RemoteBrowsers => answers.remote_browsers.is_some(),
            QuestionId::Mobile => answers.mobile.is_some(),
            QuestionId::MobileBrowsers => answers.mobile_browsers.is_some(),
            QuestionId::MobilePlatform => answers.mobile_platform.is_some(),
            QuestionId::TestsLocation => answers.tests_location.is_some(),
            QuestionId::FeaturePath => answers.feature_path.is_some(),
            QuestionId::BaseUrl => answers.base_url.is_some(),
            QuestionId::AllowAnonymousMetrics => answers.allow_anonymous_metrics.is_some(),
        }
    }

    /// Store an answer in its field
    pub fn apply(&self, answers: &mut RawAnswers, answer: Answer) -> InitResult<()> {
        let key = self.id.key();
        match self.id {
            QuestionId::TestingType => answers.testing_type = Some(parse_many(key, answer)?),
            QuestionId::LanguageRunnerSetup => {
                answers.language_runner_setup = Some(parse_one(key, answer)?);
            }
            QuestionId::UiFramework => answers.ui_framework = Some(parse_one(key, answer)?),
            QuestionId::Backend => answers.backend = Some(parse_one(key, answer)?),
            QuestionId::CloudProvider => answers.cloud_provider = Some(parse_one(key, answer)?),
            QuestionId::SeleniumServer => answers.selenium_server = Some(parse_flag(key, answer)?),
            QuestionId::Browsers => answers.browsers = Some(parse_many(key, answer)?),
            QuestionId::RemoteBrowsers => answers.remote_browsers = Some(parse_many(key, answer)?),
            QuestionId::Mobile => answers.mobile = Some(parse_flag(key, answer)?),
            QuestionId::MobileBrowsers => answers.mobile_browsers = Some(parse_many(key, answer)?),
            QuestionId::MobilePlatform => answers.mobile_platform = Some(parse_one(key, answer)?),
            QuestionId::TestsLocation => answers.tests_location = Some(parse_text(key, answer)?),
            QuestionId::FeaturePath => answers.feature_path = Some(parse_text(key, answer)?),
            QuestionId::BaseUrl => answers.base_url = Some(parse_text(key, answer)?),
            QuestionId::AllowAnonymousMetrics => {
                answers.allow_anonymous_metrics = Some(parse_flag(key, answer)?);
            }
        }
        Ok(())
    }
}

fn parse_one<T: CatalogId>(key: &'static str, answer: Answer) -> InitResult<T> {
    match answer {
        Answer::Choice(id) | Answer::Text(id) => T::from_id(id.trim()),
        other => Err(InitError::invalid_answer(
            key,
            format!("expected a single choice, got {other:?}"),
        )),
    }
}

fn parse_many<T: CatalogId>(key: &'static str, answer: Answer) -> InitResult<Vec<T>> {
    match answer {
        Answer::Choices(ids) => ids.iter().map(|id| T::from_id(id.trim())).collect(),
        Answer::Choice(id) => Ok(vec![T::from_id(id.trim())?]),
        other => Err(InitError::invalid_answer(
            key,
            format!("expected a list of choices, got {other:?}"),
        )),
    }
}

fn parse_flag(key: &'static str, answer: Answer) -> InitResult<bool> {
    match answer {
        Answer::Flag(value) => Ok(value),
        other => Err(InitError::invalid_answer(
            key,
            format!("expected yes or no, got {other:?}"),
        )),
    }
}

fn parse_text(key: &'static str, answer: Answer) -> InitResult<String> {
    match answer {
        Answer::Text(text) => Ok(text.trim().to_string()),
        other => Err(InitError::invalid_answer(
            key,
            format!("expected text, got {other:?}"),
        )),
    }
}

fn non_empty_selection(answer: &Answer) -> Result<(), String> {
    match answer {
        Answer::Choices(ids) if ids.is_empty() => Err(SELECT_AT_LEAST_ONE.to_string()),
        _ => Ok(()),
    }
}

fn non_empty_text(answer: &Answer) -> Result<(), String> {
    match answer {
        Answer::Text(text) if text.trim().is_empty() => Err(VALUE_REQUIRED.to_string()),
        _ => Ok(()),
    }
}

fn accept(_: &Answer) -> Result<(), String> {
    Ok(())
}

fn always(_: &RawAnswers) -> bool {
    true
}

fn no_default(_: &Catalog, _: &RawAnswers) -> Option<Answer> {
    None
}

fn no_choices(_: &Catalog, _: &RawAnswers) -> Vec<Choice> {
    Vec::new()
}

fn is_web(answers: &RawAnswers) -> bool {
    Intent::of(answers).web
}

fn language_runner_choices(_: &Catalog, answers: &RawAnswers) -> Vec<Choice> {
    if answers.has_testing_type(TestingType::Component) {
        // component testing only works with the built-in runner
        vec![
            LanguageRunner::JsNightwatch.choice(),
            LanguageRunner::TsNightwatch.choice(),
        ]
    } else {
        choices_of::<LanguageRunner>()
    }
}

fn default_browsers(_: &Catalog, _: &RawAnswers) -> Option<Answer> {
    Some(Answer::choices(&[Browser::Chrome]))
}

fn default_remote_browsers(_: &Catalog, answers: &RawAnswers) -> Option<Answer> {
    answers
        .browsers
        .as_ref()
        .filter(|b| !b.is_empty())
        .map(|b| Answer::choices(b.as_slice()))
}

fn default_mobile_browsers(catalog: &Catalog, answers: &RawAnswers) -> Option<Answer> {
    let family = catalog.mobile_family();
    let selected: Vec<Browser> = answers
        .browsers
        .as_deref()
        .unwrap_or_default()
        .iter()
        .copied()
        .filter(|b| family.contains(b))
        .collect();
    Some(Answer::choices(
        catalog.strip_unsupported(&selected).as_slice(),
    ))
}

fn default_tests_location(_: &Catalog, _: &RawAnswers) -> Option<Answer> {
    Some(Answer::Text(DEFAULT_TESTS_LOCATION.to_string()))
}

fn default_feature_path(_: &Catalog, answers: &RawAnswers) -> Option<Answer> {
    let tests = answers
        .tests_location
        .as_deref()
        .unwrap_or(DEFAULT_TESTS_LOCATION);
    Some(Answer::Text(join_path(tests, FEATURES_FOLDER)))
}

fn default_base_url(_: &Catalog, answers: &RawAnswers) -> Option<Answer> {
    let url = if answers.has_testing_type(TestingType::Component) {
        DEFAULT_COMPONENT_BASE_URL
    } else {
        DEFAULT_BASE_URL
    };
    Some(Answer::Text(url.to_string()))
}

/// The ordered questions of the wizard
#[must_use]
pub fn questions() -> Vec<Question> {
    vec![
        Question {
            id: QuestionId::TestingType,
            kind: QuestionKind::MultiSelect,
            message: "Select testing type to setup for your project",
            when: always,
            default: |_, _| Some(Answer::choices(&[TestingType::E2e])),
            choices: |_, _| choices_of::<TestingType>(),
            validate: non_empty_selection,
        },
        Question {
            id: QuestionId::LanguageRunnerSetup,
            kind: QuestionKind::Select,
            message: "Select language + test runner variant",
            when: is_web,
            default: |_, _| Some(Answer::choice(LanguageRunner::JsNightwatch)),
            choices: language_runner_choices,
            validate: accept,
        },
        Question {
            id: QuestionId::UiFramework,
            kind: QuestionKind::Select,
            message: "Select UI framework",
            when: |a| a.has_testing_type(TestingType::Component),
            default: no_default,
            choices: |_, _| choices_of::<UiFramework>(),
            validate: accept,
        },
        Question {
            id: QuestionId::Backend,
            kind: QuestionKind::Select,
            message: "Where you'll be testing on?",
            when: is_web,
            default: |_, _| Some(Answer::choice(Backend::Local)),
            choices: |_, _| choices_of::<Backend>(),
            validate: accept,
        },
        Question {
            id: QuestionId::CloudProvider,
            kind: QuestionKind::Select,
            message: "Please select your cloud provider:",
            when: RawAnswers::has_remote,
            default: |_, _| Some(Answer::choice(CloudProvider::BrowserStack)),
            choices: |_, _| choices_of::<CloudProvider>(),
            validate: accept,
        },
        Question {
            id: QuestionId::SeleniumServer,
            kind: QuestionKind::Confirm,
            message: "Use a local Selenium Server to drive the browsers?",
            when: |a| a.has_local() && a.has_testing_type(TestingType::E2e),
            default: |_, _| Some(Answer::Flag(false)),
            choices: no_choices,
            validate: accept,
        },
        Question {
            id: QuestionId::Browsers,
            kind: QuestionKind::MultiSelect,
            message: "Where would you like to run your e2e tests locally?",
            when: |a| a.has_local() && is_web(a),
            default: default_browsers,
            choices: |c, _| c.desktop_browser_choices(),
            validate: non_empty_selection,
        },
        Question {
            id: QuestionId::RemoteBrowsers,
            kind: QuestionKind::MultiSelect,
            message: "Which browsers will you be testing on the remote grid?",
            when: |a| a.has_remote() && is_web(a),
            default: default_remote_browsers,
            choices: |c, _| c.desktop_browser_choices(),
            validate: non_empty_selection,
        },
        Question {
            id: QuestionId::Mobile,
            kind: QuestionKind::Confirm,
            message: "Would you like to run your e2e tests on mobile devices as well?",
            when: |a| a.has_testing_type(TestingType::E2e),
            default: |_, _| Some(Answer::Flag(false)),
            choices: no_choices,
            validate: accept,
        },
        Question {
            id: QuestionId::MobileBrowsers,
            kind: QuestionKind::MultiSelect,
            message: "Select mobile browsers to run your tests on",
            when: |a| a.mobile == Some(true) && a.has_local() && is_web(a),
            default: default_mobile_browsers,
            choices: |c, _| c.mobile_browser_choices(),
            validate: non_empty_selection,
        },
        Question {
            id: QuestionId::MobilePlatform,
            kind: QuestionKind::Select,
            message: "Select target mobile platform(s) for your app",
            when: |a| a.has_testing_type(TestingType::App),
            default: |_, _| Some(Answer::choice(MobilePlatform::Android)),
            choices: |c, _| c.mobile_platform_choices(),
            validate: accept,
        },
        Question {
            id: QuestionId::TestsLocation,
            kind: QuestionKind::Input,
            message: "Where do you plan to keep your end-to-end tests?",
            when: always,
            default: default_tests_location,
            choices: no_choices,
            validate: non_empty_text,
        },
        Question {
            id: QuestionId::FeaturePath,
            kind: QuestionKind::Input,
            message: "Where do you plan to keep your cucumber feature files?",
            when: |a| a.runner() == crate::catalog::Runner::Cucumber && is_web(a),
            default: default_feature_path,
            choices: no_choices,
            validate: non_empty_text,
        },
        Question {
            id: QuestionId::BaseUrl,
            kind: QuestionKind::Input,
            message: "What is the base_url of your project?",
            when: is_web,
            default: default_base_url,
            choices: no_choices,
            validate: non_empty_text,
        },
        Question {
            id: QuestionId::AllowAnonymousMetrics,
            kind: QuestionKind::Confirm,
            message: "Allow Nightwatch to collect completely anonymous usage metrics?",
            when: always,
            default: |_, _| Some(Answer::Flag(false)),
            choices: no_choices,
            validate: accept,
        },
    ]
}

/// A question ready to be rendered by the prompt engine
#[derive(Debug)]
pub struct Prompt<'a> {
    /// Question being asked
    pub question: &'a Question,
    /// Choices offered (empty for input/confirm)
    pub choices: Vec<Choice>,
    /// Pre-selected answer
    pub default: Option<Answer>,
}

impl Prompt<'_> {
    /// Question id
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.question.id
    }

    /// Presentation kind
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.question.kind
    }

    /// Text shown to the user
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.question.message
    }

    /// Check an answer before accepting it
    pub fn validate(&self, answer: &Answer) -> Result<(), String> {
        self.question.validate(answer)
    }
}

/// The prompt engine
pub trait Prompter {
    /// Ask one question and return an answer that passed [`Prompt::validate`]
    fn ask(&mut self, prompt: &Prompt<'_>) -> InitResult<Answer>;
}

/// Runs the ordered questions against a prompt engine
#[derive(Debug, Clone)]
pub struct QuestionFlow {
    catalog: Catalog,
    questions: Vec<Question>,
}

impl QuestionFlow {
    /// Flow with the standard questions
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            questions: questions(),
        }
    }

    /// Questions in order
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Ask every visible, unanswered question, starting from seeded answers.
    ///
    /// The resulting intent is folded back into the answers, so app-only
    /// runs come back with a local backend and empty browser lists.
    pub fn run(&self, prompter: &mut dyn Prompter, seed: RawAnswers) -> InitResult<RawAnswers> {
        let mut answers = seed;
        for question in &self.questions {
            if question.is_answered(&answers) || !question.is_visible(&answers) {
                continue;
            }
            let prompt = Prompt {
                question,
                choices: question.choices(&self.catalog, &answers),
                default: question.default_answer(&self.catalog, &answers),
            };
            let answer = prompter.ask(&prompt)?;
            if let Err(message) = question.validate(&answer) {
                return Err(InitError::invalid_answer(question.id.key(), message));
            }
            tracing::debug!(question = %question.id, ?answer, "answered");
            question.apply(&mut answers, answer)?;
        }
        // an app-only answer never reaches the backend or browser questions
        Intent::of(&answers).seed(&mut answers);
        Ok(answers)
    }
}
