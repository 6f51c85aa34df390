// src/forms.rs
//! Field values of the mock forms. Only presence is validated.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::is_filled;

pub(crate) fn filled(value: &str) -> Result<(), ValidationError> {
    if is_filled(value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("required");
        error.message = Some("Το πεδίο είναι υποχρεωτικό".into());
        Err(error)
    }
}

// ==================== REGISTRATION ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationForm {
    #[validate(custom(function = "filled"))]
    pub name: String,
    #[validate(custom(function = "filled"))]
    pub category: String,
    #[validate(custom(function = "filled"))]
    pub quantity: String,
    #[validate(custom(function = "filled"))]
    pub unit: String,
    pub description: String,
}

// ==================== RESOURCE REQUEST ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RequestForm {
    #[validate(custom(function = "filled"))]
    pub quantity_needed: String,
    #[validate(custom(function = "filled"))]
    pub justification: String,
}

impl RequestForm {
    /// Leading integer of the quantity field, `0` when there is none.
    pub fn quantity(&self) -> u32 {
        let digits: String = self
            .quantity_needed
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().unwrap_or(0)
    }
}

// ==================== MUNICIPAL BORROW ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BorrowForm {
    #[validate(custom(function = "filled"))]
    pub municipality: String,
    #[validate(custom(function = "filled"))]
    pub resource: String,
    #[validate(custom(function = "filled"))]
    pub quantity: String,
    #[validate(custom(function = "filled"))]
    pub start_date: String,
    #[validate(custom(function = "filled"))]
    pub end_date: String,
    #[validate(custom(function = "filled"))]
    pub reason: String,
}

impl Default for BorrowForm {
    fn default() -> Self {
        Self {
            municipality: String::new(),
            resource: String::new(),
            quantity: "1".to_string(),
            start_date: String::new(),
            end_date: String::new(),
            reason: String::new(),
        }
    }
}
