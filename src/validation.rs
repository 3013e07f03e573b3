use std::fmt;

use crate::models::{Empaque, Llegada, NewQuestion, NewRating, Sabor};

pub const COMENTARIO_MAX: usize = 500;
pub const PREGUNTA_MIN: usize = 5;
pub const PREGUNTA_MAX: usize = 1000;
pub const TELEFONO_MIN: usize = 10;
pub const TELEFONO_MAX: usize = 25;

pub struct Rule {
    pub name: &'static str,
    pub validate: fn(&str) -> Result<(), String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn push(&mut self, field: &'static str, message: String) {
        self.0.push(FieldError { field, message });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Raw rating form input, exactly as typed or selected.
#[derive(Debug, Clone, Default)]
pub struct RatingForm {
    pub sabor: Option<String>,
    pub llegada: Option<String>,
    pub empaque: Option<String>,
    pub comentario: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionForm {
    pub pregunta: String,
    pub telefono: Option<String>,
}

fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')')
}

pub fn comentario_rules() -> Vec<Rule> {
    vec![Rule {
        name: "max_length",
        validate: |value| {
            if value.chars().count() > COMENTARIO_MAX {
                Err("El comentario es demasiado largo. Máximo 500 caracteres.".to_string())
            } else {
                Ok(())
            }
        },
    }]
}

pub fn pregunta_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "min_length",
            validate: |value| {
                if value.chars().count() < PREGUNTA_MIN {
                    Err("La pregunta es muy corta.".to_string())
                } else {
                    Ok(())
                }
            },
        },
        Rule {
            name: "max_length",
            validate: |value| {
                if value.chars().count() > PREGUNTA_MAX {
                    Err("La pregunta es demasiado larga.".to_string())
                } else {
                    Ok(())
                }
            },
        },
    ]
}

pub fn telefono_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "allowed_chars",
            validate: |value| {
                if value.is_empty() || !value.chars().all(is_phone_char) {
                    Err("El teléfono contiene caracteres no permitidos.".to_string())
                } else {
                    Ok(())
                }
            },
        },
        Rule {
            name: "min_length",
            validate: |value| {
                if value.chars().count() < TELEFONO_MIN {
                    Err("El teléfono debe tener al menos 10 caracteres válidos.".to_string())
                } else {
                    Ok(())
                }
            },
        },
        Rule {
            name: "max_length",
            validate: |value| {
                if value.chars().count() > TELEFONO_MAX {
                    Err("Número demasiado largo.".to_string())
                } else {
                    Ok(())
                }
            },
        },
    ]
}

/// First failing rule wins.
fn check(rules: &[Rule], value: &str) -> Result<(), String> {
    rules.iter().try_for_each(|rule| (rule.validate)(value))
}

fn choice<T: std::str::FromStr>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    message: &str,
) -> Option<T> {
    match value.and_then(|v| v.parse::<T>().ok()) {
        Some(parsed) => Some(parsed),
        None => {
            errors.push(field, message.to_string());
            None
        }
    }
}

/// Turns empty or absent text into `None`.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

impl RatingForm {
    pub fn validate(&self) -> Result<NewRating, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let sabor: Option<Sabor> = choice(
            &mut errors,
            "sabor",
            self.sabor.as_deref(),
            "Debes seleccionar una opción para el sabor.",
        );
        let llegada: Option<Llegada> = choice(
            &mut errors,
            "llegada",
            self.llegada.as_deref(),
            "Debes indicar la temperatura de llegada.",
        );
        let empaque: Option<Empaque> = choice(
            &mut errors,
            "empaque",
            self.empaque.as_deref(),
            "Debes calificar el estado del empaque.",
        );

        let comentario = non_empty(self.comentario.as_deref());
        if let Some(text) = &comentario {
            if let Err(message) = check(&comentario_rules(), text) {
                errors.push("comentario", message);
            }
        }

        match (sabor, llegada, empaque) {
            (Some(sabor), Some(llegada), Some(empaque)) if errors.is_empty() => Ok(NewRating {
                sabor,
                llegada,
                empaque,
                comentario,
            }),
            _ => Err(errors),
        }
    }
}

impl QuestionForm {
    pub fn validate(&self) -> Result<NewQuestion, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if let Err(message) = check(&pregunta_rules(), &self.pregunta) {
            errors.push("pregunta", message);
        }

        let telefono = non_empty(self.telefono.as_deref());
        if let Some(phone) = &telefono {
            if let Err(message) = check(&telefono_rules(), phone) {
                errors.push("telefono", message);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewQuestion {
            pregunta: self.pregunta.clone(),
            telefono,
        })
    }
}
