//! The address form and its client-side validation.

use crate::model::{Address, AddressRequest, PostalAddress};
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Nickname,
    PostalCode,
    Street,
    Number,
    Neighborhood,
    City,
    State,
}

impl Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AddressField::Nickname => "nickname",
            AddressField::PostalCode => "postal code",
            AddressField::Street => "street",
            AddressField::Number => "number",
            AddressField::Neighborhood => "neighborhood",
            AddressField::City => "city",
            AddressField::State => "state",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Required,
    /// Postal code without exactly eight digits.
    MalformedPostalCode,
    /// Postal code the lookup service does not know.
    UnknownPostalCode,
    TooLong { max: usize },
}

impl Display for FieldProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldProblem::Required => f.write_str("is required"),
            FieldProblem::MalformedPostalCode => f.write_str("must have 8 digits"),
            FieldProblem::UnknownPostalCode => f.write_str("was not found"),
            FieldProblem::TooLong { max } => write!(f, "must have at most {max} characters"),
        }
    }
}

/// Every field problem found in one validation pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid address: {}", describe(.0))]
pub struct ValidationErrors(pub Vec<(AddressField, FieldProblem)>);

impl ValidationErrors {
    pub fn has(&self, field: AddressField) -> bool {
        self.0.iter().any(|(f, _)| *f == field)
    }
}

fn describe(problems: &[(AddressField, FieldProblem)]) -> String {
    problems
        .iter()
        .map(|(field, problem)| format!("{field} {problem}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Editable address fields, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressForm {
    pub nickname: String,
    pub cep: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub uf: String,
    pub primary: bool,
    /// Set when a postal lookup rejected the current code.
    pub cep_unknown: bool,
}

impl Default for AddressForm {
    fn default() -> Self {
        Self {
            nickname: String::new(),
            cep: String::new(),
            street: String::new(),
            number: String::new(),
            complement: String::new(),
            neighborhood: String::new(),
            city: String::new(),
            uf: String::new(),
            primary: true,
            cep_unknown: false,
        }
    }
}

impl AddressForm {
    /// Pre-fills the form for editing a saved address.
    pub fn from_address(address: &Address) -> Self {
        Self {
            nickname: address.nickname.clone(),
            cep: address.cep.clone(),
            street: address.street.clone(),
            number: address.number.clone(),
            complement: address.complement.clone().unwrap_or_default(),
            neighborhood: address.neighborhood.clone(),
            city: address.city.clone(),
            uf: address.uf.clone(),
            primary: address.primary,
            cep_unknown: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copies the street data of a successful postal lookup into the form.
    pub fn apply_postal(&mut self, found: &PostalAddress) {
        self.street = found.street.clone();
        self.neighborhood = found.neighborhood.clone();
        self.city = found.city.clone();
        self.uf = found.uf.clone();
        self.complement = found.complement.clone();
        self.cep_unknown = false;
    }

    /// Checks every constraint and builds the request body if all hold.
    pub fn validate(&self) -> Result<AddressRequest, ValidationErrors> {
        let mut problems = Vec::new();
        let mut required = |field: AddressField, value: &str| {
            if value.trim().is_empty() {
                problems.push((field, FieldProblem::Required));
                false
            } else {
                true
            }
        };

        required(AddressField::Nickname, &self.nickname);
        let has_cep = required(AddressField::PostalCode, &self.cep);
        required(AddressField::Street, &self.street);
        required(AddressField::Number, &self.number);
        required(AddressField::Neighborhood, &self.neighborhood);
        required(AddressField::City, &self.city);
        let has_uf = required(AddressField::State, &self.uf);

        let cep: String = self.cep.chars().filter(char::is_ascii_digit).collect();
        if has_cep {
            if cep.len() != 8 {
                problems.push((AddressField::PostalCode, FieldProblem::MalformedPostalCode));
            } else if self.cep_unknown {
                problems.push((AddressField::PostalCode, FieldProblem::UnknownPostalCode));
            }
        }
        if has_uf && self.uf.trim().chars().count() > 2 {
            problems.push((AddressField::State, FieldProblem::TooLong { max: 2 }));
        }

        if !problems.is_empty() {
            return Err(ValidationErrors(problems));
        }

        let complement = self.complement.trim();
        Ok(AddressRequest {
            nickname: self.nickname.trim().to_string(),
            cep,
            street: self.street.trim().to_string(),
            number: self.number.trim().to_string(),
            complement: (!complement.is_empty()).then(|| complement.to_string()),
            neighborhood: self.neighborhood.trim().to_string(),
            city: self.city.trim().to_string(),
            uf: self.uf.trim().to_uppercase(),
            primary: self.primary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AddressForm {
        AddressForm {
            nickname: "Obra".into(),
            cep: "01310-100".into(),
            street: "Avenida Paulista".into(),
            number: "1000".into(),
            complement: " ".into(),
            neighborhood: "Bela Vista".into(),
            city: "São Paulo".into(),
            uf: "sp".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_builds_request() {
        let request = filled().validate().unwrap();
        assert_eq!(request.cep, "01310100");
        assert_eq!(request.uf, "SP");
        assert_eq!(request.complement, None);
        assert!(request.primary);
    }

    #[test]
    fn test_blank_form_reports_every_required_field() {
        let errors = AddressForm::default().validate().unwrap_err();
        assert_eq!(errors.0.len(), 7);
        assert!(errors.0.iter().all(|(_, p)| *p == FieldProblem::Required));
    }

    #[test]
    fn test_short_postal_code_and_long_state() {
        let form = AddressForm {
            cep: "0131-01".into(),
            uf: "SPX".into(),
            ..filled()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has(AddressField::PostalCode));
        assert!(errors.has(AddressField::State));
        assert!(!errors.has(AddressField::Street));
        assert!(errors.to_string().contains("postal code must have 8 digits"));
    }

    #[test]
    fn test_unknown_postal_code_blocks_until_fixed() {
        let mut form = AddressForm {
            cep_unknown: true,
            ..filled()
        };
        assert!(form.validate().unwrap_err().has(AddressField::PostalCode));

        form.apply_postal(&PostalAddress {
            street: "Rua Augusta".into(),
            neighborhood: "Consolação".into(),
            city: "São Paulo".into(),
            uf: "SP".into(),
            complement: String::new(),
        });
        assert_eq!(form.validate().unwrap().street, "Rua Augusta");
    }

    #[test]
    fn test_reset_restores_primary_default() {
        let mut form = AddressForm {
            primary: false,
            ..filled()
        };
        form.reset();
        assert_eq!(form, AddressForm::default());
        assert!(form.primary);
    }
}
