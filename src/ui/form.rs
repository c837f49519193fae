//! Form field primitives: labeled text / number / select / textarea inputs
//! with validation-message display.
//!
//! Fields hold no value of their own: the caller supplies the current value
//! when validating or rendering, and raw user input is turned into a typed
//! [`FieldValue`] with [`FormField::parse`].

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::FieldError;

/// One entry of a select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    /// Stored value, e.g. `"first-time"`.
    pub value: &'static str,
    /// Human label, e.g. `"First-time buyer"`.
    pub label: &'static str,
}

impl SelectOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Supported input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    TextArea,
    Select(&'static [SelectOption]),
}

/// A parsed field value ready to be merged into a draft record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
}

impl FieldValue {
    /// Text content, or the number rendered as text.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.normalize().to_string(),
        }
    }

    /// Numeric content; text values yield `None`.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    /// Dotted path into the draft record, e.g. `business.name`.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
    pub helper: Option<&'static str>,
}

impl FormField {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            placeholder: "",
            helper: None,
        }
    }

    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub const fn email(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Email)
    }

    pub const fn number(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub const fn textarea(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::TextArea)
    }

    pub const fn select(
        key: &'static str,
        label: &'static str,
        options: &'static [SelectOption],
    ) -> Self {
        Self::new(key, label, FieldKind::Select(options))
    }

    /// Builder: mark as required.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Builder: set placeholder text.
    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Builder: set helper text shown under the input.
    pub const fn helper(mut self, helper: &'static str) -> Self {
        self.helper = Some(helper);
        self
    }

    /// Select options, empty for non-select fields.
    pub fn options(&self) -> &'static [SelectOption] {
        match self.kind {
            FieldKind::Select(options) => options,
            _ => &[],
        }
    }

    /// Parse raw user input into a typed value.
    ///
    /// Numbers accept `$` and `,` decoration. Select fields accept the
    /// option value, its label, or its 1-based position.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, FieldError> {
        let trimmed = raw.trim();
        match self.kind {
            FieldKind::Text | FieldKind::Email | FieldKind::TextArea => {
                Ok(FieldValue::Text(trimmed.to_string()))
            }
            FieldKind::Number => {
                let cleaned: String = trimmed
                    .chars()
                    .filter(|c| !matches!(c, '$' | ',' | '_'))
                    .collect();
                Decimal::from_str(&cleaned)
                    .map(FieldValue::Number)
                    .map_err(|_| FieldError::InvalidNumber {
                        key: self.key.to_string(),
                        label: self.label.to_string(),
                        value: trimmed.to_string(),
                    })
            }
            FieldKind::Select(options) => self
                .resolve_option(options, trimmed)
                .map(|opt| FieldValue::Text(opt.value.to_string()))
                .ok_or_else(|| self.invalid_option(options)),
        }
    }

    /// Validate the current value of this field.
    ///
    /// `None` or blank means the field is empty.
    pub fn validate(&self, current: Option<&str>) -> Result<(), FieldError> {
        let value = current.map(str::trim).filter(|v| !v.is_empty());
        let Some(value) = value else {
            if self.required {
                return Err(FieldError::Required {
                    key: self.key.to_string(),
                    label: self.label.to_string(),
                });
            }
            return Ok(());
        };

        match self.kind {
            FieldKind::Email if !looks_like_email(value) => Err(FieldError::InvalidEmail {
                key: self.key.to_string(),
                label: self.label.to_string(),
            }),
            FieldKind::Select(options) if !options.iter().any(|o| o.value == value) => {
                Err(self.invalid_option(options))
            }
            _ => Ok(()),
        }
    }

    /// Render the field as a labeled line with its value and, if present,
    /// the validation message.
    pub fn render(&self, current: Option<&str>, error: Option<&FieldError>) -> String {
        let marker = if self.required { " *" } else { "" };
        let shown = match current.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.display_value(value),
            None if !self.placeholder.is_empty() => format!("({})", self.placeholder),
            None => "-".to_string(),
        };

        let mut out = format!("{}{}: {}", self.label, marker, shown);
        if let Some(helper) = self.helper {
            out.push_str(&format!("\n    {helper}"));
        }
        if let Some(err) = error {
            out.push_str(&format!("\n    ! {err}"));
        }
        out
    }

    fn display_value(&self, value: &str) -> String {
        self.options()
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.to_string())
            .unwrap_or_else(|| value.to_string())
    }

    fn resolve_option(
        &self,
        options: &'static [SelectOption],
        input: &str,
    ) -> Option<&'static SelectOption> {
        if let Ok(index) = input.parse::<usize>() {
            if index >= 1 {
                return options.get(index - 1);
            }
        }
        options
            .iter()
            .find(|o| o.value.eq_ignore_ascii_case(input) || o.label.eq_ignore_ascii_case(input))
    }

    fn invalid_option(&self, options: &[SelectOption]) -> FieldError {
        FieldError::InvalidOption {
            key: self.key.to_string(),
            label: self.label.to_string(),
            options: options.iter().map(|o| o.value).collect::<Vec<_>>().join(", "),
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAM: &[SelectOption] = &[
        SelectOption::new("solo", "Solo founder (1 person)"),
        SelectOption::new("small", "Small team (2-10 people)"),
    ];

    #[test]
    fn number_parse_strips_currency_decoration() {
        let field = FormField::number("financials.asking_price", "Asking Price");
        let value = field.parse("$1,250,000").unwrap();
        assert_eq!(value.as_number(), Some(Decimal::from(1_250_000)));
    }

    #[test]
    fn number_parse_rejects_text() {
        let field = FormField::number("budget.min", "Minimum Budget");
        let err = field.parse("lots").unwrap_err();
        assert_eq!(err.key(), "budget.min");
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn select_accepts_value_label_or_index() {
        let field = FormField::select("investment_focus.team_size", "Preferred Team Size", TEAM);
        assert_eq!(field.parse("small").unwrap(), FieldValue::Text("small".into()));
        assert_eq!(
            field.parse("solo founder (1 person)").unwrap(),
            FieldValue::Text("solo".into())
        );
        assert_eq!(field.parse("2").unwrap(), FieldValue::Text("small".into()));
        assert!(field.parse("0").is_err());
        assert!(field.parse("huge").is_err());
    }

    #[test]
    fn required_field_reports_missing_value() {
        let field = FormField::text("first_name", "First Name").required();
        assert!(matches!(field.validate(None), Err(FieldError::Required { .. })));
        assert!(matches!(field.validate(Some("   ")), Err(FieldError::Required { .. })));
        assert!(field.validate(Some("Ada")).is_ok());
    }

    #[test]
    fn optional_field_accepts_empty() {
        let field = FormField::text("business.website", "Website (Optional)");
        assert!(field.validate(None).is_ok());
    }

    #[test]
    fn email_validation() {
        let field = FormField::email("email", "Email Address");
        assert!(field.validate(Some("ada@example.com")).is_ok());
        assert!(matches!(
            field.validate(Some("ada.example.com")),
            Err(FieldError::InvalidEmail { .. })
        ));
        assert!(field.validate(Some("ada@localhost")).is_err());
    }

    #[test]
    fn select_validation_checks_membership() {
        let field = FormField::select("investment_focus.team_size", "Preferred Team Size", TEAM);
        assert!(field.validate(Some("solo")).is_ok());
        assert!(matches!(
            field.validate(Some("giant")),
            Err(FieldError::InvalidOption { .. })
        ));
    }

    #[test]
    fn render_shows_placeholder_helper_and_error() {
        let field = FormField::number("financials.profit", "Net Profit")
            .required()
            .placeholder("150000")
            .helper("Annual net profit");
        let err = field.validate(None).unwrap_err();
        let rendered = field.render(None, Some(&err));
        assert!(rendered.starts_with("Net Profit *: (150000)"));
        assert!(rendered.contains("Annual net profit"));
        assert!(rendered.contains("! Net Profit is required"));
    }

    #[test]
    fn render_select_shows_label() {
        let field = FormField::select("investment_focus.team_size", "Preferred Team Size", TEAM);
        assert_eq!(
            field.render(Some("small"), None),
            "Preferred Team Size: Small team (2-10 people)"
        );
    }

    #[test]
    fn number_value_as_text_is_normalized() {
        let value = FieldValue::Number(Decimal::new(25000, 2));
        assert_eq!(value.as_text(), "250");
    }
}
