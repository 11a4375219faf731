//! Contact form rules (`#contact form`).
//!
//! Fields are matched by `name` (falling back to `id`). Each rule is a pure
//! function of the trimmed value and the control kind; the DOM side only
//! renders the resulting [`FieldError`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static KATAKANA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ァ-ヶー　\s]+$").expect("katakana pattern is valid"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\-]{10,13}$").expect("phone pattern is valid"));

/// Shown when every field passes. The page is a demo and never submits.
pub const DEMO_SUBMIT_NOTICE: &str = "デモサイトのため、実際には送信されません。";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Select,
    Checkbox { checked: bool },
    Hidden,
    Submit,
    Button,
}

impl FieldKind {
    pub fn from_input_type(input_type: &str, checked: bool) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "checkbox" => Self::Checkbox { checked },
            "hidden" => Self::Hidden,
            "submit" => Self::Submit,
            "button" => Self::Button,
            _ => Self::Text,
        }
    }

    pub fn skipped_on_submit(self) -> bool {
        matches!(self, Self::Hidden | Self::Submit | Self::Button)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Field<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub kind: FieldKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("お名前を入力してください。")]
    NameRequired,
    #[error("フリガナを入力してください。")]
    KanaRequired,
    #[error("カタカナで入力してください。")]
    KanaFormat,
    #[error("メールアドレスを入力してください。")]
    EmailRequired,
    #[error("正しいメールアドレスを入力してください。")]
    EmailFormat,
    #[error("電話番号を入力してください。")]
    PhoneRequired,
    #[error("正しい電話番号を入力してください（例: 090-1234-5678）。")]
    PhoneFormat,
    #[error("お問い合わせ種別を選択してください。")]
    InquiryTypeRequired,
    #[error("プライバシーポリシーに同意してください。")]
    ConsentRequired,
}

pub fn validate_field(field: &Field<'_>) -> Result<(), FieldError> {
    let value = field.value.trim();

    match field.key {
        "name" => require(value, FieldError::NameRequired),
        "furigana" | "kana" | "name-kana" => {
            require(value, FieldError::KanaRequired)?;
            matches_pattern(&KATAKANA, value, FieldError::KanaFormat)
        }
        "email" => {
            require(value, FieldError::EmailRequired)?;
            matches_pattern(&EMAIL, value, FieldError::EmailFormat)
        }
        "phone" | "tel" => {
            require(value, FieldError::PhoneRequired)?;
            matches_pattern(&PHONE, value, FieldError::PhoneFormat)
        }
        "inquiry_type" | "inquiry-type" | "type" => match field.kind {
            FieldKind::Select if value.is_empty() => Err(FieldError::InquiryTypeRequired),
            _ => Ok(()),
        },
        "privacy" | "agree" => match field.kind {
            FieldKind::Checkbox { checked: false } => Err(FieldError::ConsentRequired),
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

fn require(value: &str, error: FieldError) -> Result<(), FieldError> {
    if value.is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}

fn matches_pattern(pattern: &Regex, value: &str, error: FieldError) -> Result<(), FieldError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(error)
    }
}

pub fn error_element_id(key: &str) -> String {
    format!("error-{key}")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldFailure {
    pub field: String,
    pub error: FieldError,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct FormReport {
    pub checked: usize,
    pub failures: Vec<FieldFailure>,
}

impl FormReport {
    pub fn record(&mut self, key: &str, result: Result<(), FieldError>) {
        self.checked += 1;
        if let Err(error) = result {
            self.failures.push(FieldFailure {
                field: key.to_string(),
                error,
            });
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validates every submittable field; one failure does not stop the rest
/// from being checked. `on_checked` gets the position of each checked field
/// in `fields` along with its result.
pub fn validate_form<'a>(
    fields: impl IntoIterator<Item = Field<'a>>,
    mut on_checked: impl FnMut(usize, Result<(), FieldError>),
) -> FormReport {
    let mut report = FormReport::default();
    for (index, field) in fields.into_iter().enumerate() {
        if field.kind.skipped_on_submit() {
            continue;
        }
        let result = validate_field(&field);
        on_checked(index, result);
        report.record(field.key, result);
    }
    report
}
