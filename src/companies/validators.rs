use regex::Regex;
use std::sync::OnceLock;

use super::countries::{is_valid_country, normalize_country};
use super::models::{
    CompanyChanges, CompanyFilter, CompanyFilterParams, CompanyPayload, CompanyType, NewCompany,
};
use crate::common::{ApiError, ValidationResult, Validator};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_IMAGE_LEN: usize = 100;
pub const MAX_URL_LEN: usize = 200;
pub const MAX_EMPLOYEE_COUNT: i64 = 2_147_483_647;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";

/// Validates company payloads; `partial` (PATCH) skips the required-field checks
pub struct CompanyValidator {
    pub partial: bool,
}

impl Validator<CompanyPayload> for CompanyValidator {
    fn validate(&self, data: &CompanyPayload) -> ValidationResult {
        self.check(data).1
    }
}

impl CompanyValidator {
    /// Validates the payload, then returns its normalized fields
    pub fn clean(&self, data: &CompanyPayload) -> Result<CompanyChanges, ApiError> {
        let result = self.validate(data);
        if !result.is_valid {
            return Err(ApiError::from(result));
        }
        Ok(self.check(data).0)
    }

    fn check(&self, data: &CompanyPayload) -> (CompanyChanges, ValidationResult) {
        let mut result = ValidationResult::new();
        let mut changes = CompanyChanges::default();

        if let Some(name) = present(&data.name, "name", self.partial, &mut result) {
            match check_name(name) {
                Ok(name) => changes.name = Some(name),
                Err(message) => result.add_error("name", &message),
            }
        }

        if let Some(raw) = present(&data.company_type, "type", self.partial, &mut result) {
            match raw.parse::<CompanyType>() {
                Ok(company_type) => changes.company_type = Some(company_type),
                Err(()) => result.add_error("type", &invalid_choice(raw)),
            }
        }

        if let Some(raw) = present(&data.country, "country", self.partial, &mut result) {
            let code = normalize_country(raw);
            if is_valid_country(&code) {
                changes.country = Some(code);
            } else {
                result.add_error("country", &invalid_choice(raw));
            }
        }

        if let Some(url) = present(&data.url, "url", true, &mut result) {
            match check_url(url) {
                Ok(url) => changes.url = Some(url),
                Err(message) => result.add_error("url", &message),
            }
        }

        if let Some(image) = &data.image {
            match image.as_deref().map(str::trim) {
                None | Some("") => changes.image = Some(None),
                Some(reference) if reference.chars().count() > MAX_IMAGE_LEN => {
                    result.add_error("image", &too_long(MAX_IMAGE_LEN))
                }
                Some(reference) => changes.image = Some(Some(reference.to_string())),
            }
        }

        if let Some(&count) = present(&data.employee_count, "employee_count", true, &mut result) {
            if count < 0 {
                result.add_error("employee_count", "Ensure this value is greater than or equal to 0.");
            } else if count > MAX_EMPLOYEE_COUNT {
                result.add_error(
                    "employee_count",
                    &format!(
                        "Ensure this value is less than or equal to {}.",
                        MAX_EMPLOYEE_COUNT
                    ),
                );
            } else {
                changes.employee_count = Some(count);
            }
        }

        (changes, result)
    }
}

/// Validates a create payload; every error from every field is reported together
pub fn validate_new_company(payload: &CompanyPayload) -> Result<NewCompany, ApiError> {
    let changes = CompanyValidator { partial: false }.clean(payload)?;

    match (changes.name, changes.company_type, changes.country) {
        (Some(name), Some(company_type), Some(country)) => Ok(NewCompany {
            name,
            image: changes.image.flatten(),
            company_type,
            country,
            url: changes.url.unwrap_or_default(),
            employee_count: changes.employee_count.unwrap_or(0),
        }),
        _ => Err(ApiError::InternalServer(
            "validated payload is missing required fields".to_string(),
        )),
    }
}

/// Validates an update payload (PUT when `partial` is false, PATCH otherwise)
pub fn validate_company_changes(
    payload: &CompanyPayload,
    partial: bool,
) -> Result<CompanyChanges, ApiError> {
    CompanyValidator { partial }.clean(payload)
}

/// Non-null value of a field. An explicit `null` is always an error;
/// absence is one unless `may_be_absent`.
fn present<'a, T>(
    field: &'a Option<Option<T>>,
    name: &str,
    may_be_absent: bool,
    result: &mut ValidationResult,
) -> Option<&'a T> {
    match field {
        Some(Some(value)) => Some(value),
        Some(None) => {
            result.add_error(name, NOT_NULL);
            None
        }
        None if !may_be_absent => {
            result.add_error(name, REQUIRED);
            None
        }
        None => None,
    }
}

fn check_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("This field may not be blank.".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(too_long(MAX_NAME_LEN));
    }
    Ok(trimmed.to_string())
}

/// Blank is allowed and stored as an empty string
fn check_url(url: &str) -> Result<String, String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed.chars().count() > MAX_URL_LEN {
        return Err(too_long(MAX_URL_LEN));
    }
    if !is_valid_url(trimmed) {
        return Err("Enter a valid URL.".to_string());
    }
    Ok(trimmed.to_string())
}

fn url_regex() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)^(?:https?|ftps?)://",
            r"(?:[^\s:@/]+(?::[^\s:@/]*)?@)?",
            r"(?:localhost",
            r"|(?:(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)",
            r"|(?:[a-z0-9\x{a1}-\x{ffff}](?:[a-z0-9\x{a1}-\x{ffff}-]{0,61}[a-z0-9\x{a1}-\x{ffff}])?\.)+",
            r"[a-z\x{a1}-\x{ffff}-]{2,63}\.?)",
            r"(?::\d{1,5})?",
            r"(?:[/?#]\S*)?$",
        ))
        .expect("URL pattern is valid")
    })
}

pub fn is_valid_url(url: &str) -> bool {
    url_regex().is_match(url)
}

fn invalid_choice(value: &str) -> String {
    format!("\"{}\" is not a valid choice.", value)
}

fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {} characters.", max)
}

/// Turns raw query parameters into a filter; empty values count as absent
pub fn validate_filter(params: &CompanyFilterParams) -> Result<CompanyFilter, ApiError> {
    let mut result = ValidationResult::new();
    let mut filter = CompanyFilter::default();

    if let Some(raw) = non_empty(&params.company_type) {
        match raw.parse::<CompanyType>() {
            Ok(company_type) => filter.company_type = Some(company_type),
            Err(()) => result.add_error("type", &unavailable_choice(raw)),
        }
    }

    if let Some(raw) = non_empty(&params.country) {
        let code = normalize_country(raw);
        if is_valid_country(&code) {
            filter.country = Some(code);
        } else {
            result.add_error("country", &unavailable_choice(raw));
        }
    }

    if let Some(raw) = non_empty(&params.min_employee) {
        match parse_number(raw) {
            Some(value) => filter.min_employee = Some(value),
            None => result.add_error("min_employee", "Enter a number."),
        }
    }

    if let Some(raw) = non_empty(&params.max_employee) {
        match parse_number(raw) {
            Some(value) => filter.max_employee = Some(value),
            None => result.add_error("max_employee", "Enter a number."),
        }
    }

    if !result.is_valid {
        return Err(ApiError::from(result));
    }
    Ok(filter)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn unavailable_choice(value: &str) -> String {
    format!(
        "Select a valid choice. {} is not one of the available choices.",
        value
    )
}
