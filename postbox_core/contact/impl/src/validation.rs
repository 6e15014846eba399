use std::sync::LazyLock;

use postbox_models::contact::{
    ContactField, ContactFormValues, ContactSubmission, FieldResult, ValidationOutcome,
    ValidationProblems,
};
use regex::Regex;

const NAME_INVALID_CHARS: &str = "input may only include letters (incl. accented) and symbols [.'-]";
const NAME_FIRST_LAST: &str = "first and last names are required";

const EMAIL_NO_AT: &str = "email address must separate the prefix and the domain with an @";
const EMAIL_MULTIPLE_AT: &str = "only one @ allowed";
const EMAIL_PREFIX_INVALID_CHARS: &str = "prefix contains illegal characters";
const EMAIL_DOMAIN_INVALID_CHARS: &str = "domain contains illegal characters";
const EMAIL_PREFIX_EDGE_SYMBOL: &str = "prefix cannot start or end with a symbol";
const EMAIL_DOMAIN_EDGE_SYMBOL: &str = "domain cannot start or end with a symbol";
const EMAIL_CONSECUTIVE_SYMBOLS: &str = "email contains consecutive symbols";
const EMAIL_DOMAIN_NO_DOT: &str = "domain does not contain any dots";

const PHONE_TOO_FEW: &str = "input has too few numbers";
const PHONE_TOO_MANY: &str = "input has too many numbers";
const PHONE_NOT_AMERICAN: &str = "input is not an American phone number";

const HEADER_TOO_SHORT: &str = "input must be longer than 10 characters";
const HEADER_TOO_LONG: &str = "input must have less than 100 characters";
const MESSAGE_TOO_SHORT: &str = "input must be longer than 10 characters";
const MESSAGE_TOO_LONG: &str = "input must have less than 1,000 characters";

pub const HEADER_MATCHES_MESSAGE: &str = "header and message cannot match";

const EMAIL_PREFIX_SYMBOLS: &str = "_.-";
const EMAIL_DOMAIN_SYMBOLS: &str = ".-";

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;
const PHONE_AMERICAN_DIGITS: usize = 10;

const HEADER_MIN_LENGTH: usize = 10;
const HEADER_MAX_LENGTH: usize = 100;
const MESSAGE_MIN_LENGTH: usize = 10;
const MESSAGE_MAX_LENGTH: usize = 1_000;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-zÀ-ÖØ-öø-ÿ .'-]+$").unwrap());
static EMAIL_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9_.-]+$").unwrap());
static EMAIL_DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9.-]+$").unwrap());
static EMAIL_CONSECUTIVE_SYMBOLS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[._-][._-]").unwrap());

/// Validate all fields of a submission.
///
/// Every field is checked, so the caller gets to see all problems at once.
pub fn validate_submission(submission: &ContactSubmission) -> ValidationOutcome {
    let fields = [
        (ContactField::Name, validate_name(submission.name.as_deref())),
        (ContactField::Email, validate_email(submission.email.as_deref())),
        (ContactField::Phone, validate_phone(submission.phone.as_deref())),
        (ContactField::Header, validate_header(submission.header.as_deref())),
        (ContactField::Message, validate_message(submission.message.as_deref())),
    ];

    if !fields.iter().all(|(_, result)| result.is_valid()) {
        let problems = fields
            .into_iter()
            .filter(|(_, result)| !result.is_valid())
            .map(|(field, result)| (field, result.problems))
            .collect();
        return ValidationOutcome::Invalid { problems };
    }

    let warnings = fields
        .iter()
        .filter(|(_, result)| !result.warnings.is_empty())
        .map(|(field, result)| (*field, result.warnings.clone()))
        .collect();

    let [name, email, phone, header, message] = fields.map(|(_, result)| result.value);

    // identical header and message is a strong indicator for spam
    if header == message {
        return ValidationOutcome::Invalid {
            problems: ValidationProblems::from([(
                ContactField::Header,
                vec![HEADER_MATCHES_MESSAGE.into()],
            )]),
        };
    }

    ValidationOutcome::Valid {
        values: ContactFormValues {
            name,
            email,
            phone,
            header,
            message,
        },
        warnings,
    }
}

pub fn validate_name(input: Option<&str>) -> FieldResult {
    let Some(name) = prettify(input) else {
        return FieldResult::no_value();
    };

    let mut problems = Vec::new();
    if !NAME_REGEX.is_match(&name) {
        problems.push(NAME_INVALID_CHARS.into());
    }
    if !name.contains(' ') {
        problems.push(NAME_FIRST_LAST.into());
    }

    FieldResult::new(name, problems)
}

pub fn validate_email(input: Option<&str>) -> FieldResult {
    let Some(email) = prettify(input) else {
        return FieldResult::no_value();
    };

    let mut problems = Vec::new();
    match email.split('@').collect::<Vec<_>>()[..] {
        [_] => problems.push(EMAIL_NO_AT.into()),
        [prefix, domain] => {
            if !EMAIL_PREFIX_REGEX.is_match(prefix) {
                problems.push(EMAIL_PREFIX_INVALID_CHARS.into());
            }
            if !EMAIL_DOMAIN_REGEX.is_match(domain) {
                problems.push(EMAIL_DOMAIN_INVALID_CHARS.into());
            }
            if has_edge_symbol(prefix, EMAIL_PREFIX_SYMBOLS) {
                problems.push(EMAIL_PREFIX_EDGE_SYMBOL.into());
            }
            if has_edge_symbol(domain, EMAIL_DOMAIN_SYMBOLS) {
                problems.push(EMAIL_DOMAIN_EDGE_SYMBOL.into());
            }
            if EMAIL_CONSECUTIVE_SYMBOLS_REGEX.is_match(&email) {
                problems.push(EMAIL_CONSECUTIVE_SYMBOLS.into());
            }
            if !domain.contains('.') {
                problems.push(EMAIL_DOMAIN_NO_DOT.into());
            }
        }
        _ => problems.push(EMAIL_MULTIPLE_AT.into()),
    }

    FieldResult::new(email, problems)
}

/// Only the digits of the input are taken into account. Numbers that don't
/// look American are accepted, but produce a warning.
pub fn validate_phone(input: Option<&str>) -> FieldResult {
    let Some(input) = input.filter(|x| !x.trim().is_empty()) else {
        return FieldResult::no_value();
    };

    let digits = input
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();

    let mut problems = Vec::new();
    if digits.len() < PHONE_MIN_DIGITS {
        problems.push(PHONE_TOO_FEW.into());
    }
    if digits.len() > PHONE_MAX_DIGITS {
        problems.push(PHONE_TOO_MANY.into());
    }

    let mut warnings = Vec::new();
    if digits.len() != PHONE_AMERICAN_DIGITS {
        warnings.push(PHONE_NOT_AMERICAN.into());
    }

    FieldResult::with_warnings(format_phone(&digits), problems, warnings)
}

pub fn validate_header(input: Option<&str>) -> FieldResult {
    validate_length(
        prettify(input),
        HEADER_MIN_LENGTH,
        HEADER_MAX_LENGTH,
        HEADER_TOO_SHORT,
        HEADER_TOO_LONG,
    )
}

/// Unlike the other fields, the message keeps its line breaks.
pub fn validate_message(input: Option<&str>) -> FieldResult {
    validate_length(
        prettify_lines(input),
        MESSAGE_MIN_LENGTH,
        MESSAGE_MAX_LENGTH,
        MESSAGE_TOO_SHORT,
        MESSAGE_TOO_LONG,
    )
}

fn validate_length(
    text: Option<String>,
    min: usize,
    max: usize,
    too_short: &str,
    too_long: &str,
) -> FieldResult {
    let Some(text) = text else {
        return FieldResult::no_value();
    };

    let length = text.chars().count();
    let problems = if length < min {
        vec![too_short.into()]
    } else if length > max {
        vec![too_long.into()]
    } else {
        Vec::new()
    };

    FieldResult::new(text, problems)
}

/// Trim the input and collapse all whitespace runs into single spaces.
/// Returns `None` if nothing is left.
fn prettify(input: Option<&str>) -> Option<String> {
    let pretty = input?.split_whitespace().collect::<Vec<_>>().join(" ");
    (!pretty.is_empty()).then_some(pretty)
}

/// Like [`prettify`], but applied to each line on its own so that line breaks
/// survive. Blank lines at the start and end are dropped.
fn prettify_lines(input: Option<&str>) -> Option<String> {
    let pretty = input?
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");
    let pretty = pretty.trim_matches('\n');
    (!pretty.is_empty()).then(|| pretty.to_owned())
}

fn has_edge_symbol(s: &str, symbols: &str) -> bool {
    let is_symbol = |c: char| symbols.contains(c);
    s.starts_with(is_symbol) || s.ends_with(is_symbol)
}

/// `AAA-BBB-CCCC...`, which only looks right for American numbers.
fn format_phone(digits: &str) -> String {
    let first = digits.len().min(3);
    let second = digits.len().min(6);
    format!(
        "{}-{}-{}",
        &digits[..first],
        &digits[first..second],
        &digits[second..]
    )
}
