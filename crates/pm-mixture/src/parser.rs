//! Parsing of property references such as `a_1_2`, `a | methanol | ethanol`
//! or `a_i_j | CH3OH | C2H5OH`.

use std::fmt;

use crate::error::{MixtureError, MixtureResult};

/// Component slots of a property reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholders {
    /// 1-based positions into a mixture's component list.
    Numeric { i: usize, j: usize },
    /// Component id tokens (name, formula, ...). May be empty strings.
    Component { i: String, j: String },
}

impl Placeholders {
    /// Numeric when both tokens are non-negative integers, component tokens otherwise.
    pub fn from_tokens(i: &str, j: &str) -> Self {
        match (i.trim().parse::<usize>(), j.trim().parse::<usize>()) {
            (Ok(i), Ok(j)) => Placeholders::Numeric { i, j },
            _ => Placeholders::Component {
                i: i.trim().to_string(),
                j: j.trim().to_string(),
            },
        }
    }

    /// Both component tokens, when present and non-empty.
    pub fn component_tokens(&self) -> Option<[&str; 2]> {
        match self {
            Placeholders::Component { i, j } if !i.is_empty() && !j.is_empty() => {
                Some([i.as_str(), j.as_str()])
            }
            _ => None,
        }
    }
}

/// Surface form a reference was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceForm {
    /// `prefix` with no delimiter at all.
    Bare,
    /// `prefix_i_j | comp1 | comp2`
    Nested,
    /// `prefix | comp1 | comp2`
    Scoped,
    /// `prefix_comp1_comp2` (or `prefix_1_2`)
    Inline,
}

/// Canonical form of a property reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRef {
    pub prefix: String,
    /// Main delimiter, `None` for bare references.
    pub delimiter: Option<String>,
    pub form: ReferenceForm,
    /// Slots written inline with the prefix.
    pub placeholders: Placeholders,
    /// Component scope written after the main delimiter.
    pub scope: Option<Placeholders>,
}

impl PropertyRef {
    /// Slots addressing a single cell: inline indices win, then the scope,
    /// then inline component tokens.
    pub fn cell_slots(&self) -> &Placeholders {
        match (&self.placeholders, &self.scope) {
            (Placeholders::Numeric { .. }, _) => &self.placeholders,
            (_, Some(scope)) => scope,
            (_, None) => &self.placeholders,
        }
    }

    /// Component tokens naming the mixture itself.
    pub fn mixture_tokens(&self) -> Option<[&str; 2]> {
        self.scope
            .as_ref()
            .and_then(Placeholders::component_tokens)
            .or_else(|| self.placeholders.component_tokens())
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix)?;
        match &self.placeholders {
            Placeholders::Numeric { i, j } => write!(f, "[{i},{j}]")?,
            Placeholders::Component { i, j } if !i.is_empty() || !j.is_empty() => {
                write!(f, "[{i},{j}]")?
            }
            Placeholders::Component { .. } => {}
        }
        if let Some(scope) = self.scope.as_ref().and_then(Placeholders::component_tokens) {
            write!(f, " in {}|{}", scope[0], scope[1])?;
        }
        Ok(())
    }
}

/// Splits property references on a priority-ordered delimiter list.
#[derive(Debug, Clone)]
pub struct PropertyKeyParser {
    delimiters: Vec<String>,
}

impl Default for PropertyKeyParser {
    fn default() -> Self {
        Self::new(vec!["|".to_string(), "_".to_string()])
    }
}

impl PropertyKeyParser {
    /// `delimiters` in priority order; empty entries are ignored.
    pub fn new(delimiters: Vec<String>) -> Self {
        Self {
            delimiters: delimiters.into_iter().filter(|d| !d.is_empty()).collect(),
        }
    }

    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }

    pub fn parse(&self, reference: &str) -> MixtureResult<PropertyRef> {
        let text = reference.trim();
        if text.is_empty() {
            return Err(MixtureError::InvalidArg {
                what: "empty property symbol",
            });
        }

        let Some(main) = self.delimiters.iter().find(|d| text.contains(d.as_str())) else {
            return Ok(PropertyRef {
                prefix: text.to_string(),
                delimiter: None,
                form: ReferenceForm::Bare,
                placeholders: Placeholders::from_tokens("", ""),
                scope: None,
            });
        };

        let segments: Vec<&str> = text.split(main.as_str()).map(str::trim).collect();
        let head = segments[0];
        let nested = self
            .delimiters
            .iter()
            .find(|d| *d != main && head.contains(d.as_str()));

        let parsed = if let Some(inner) = nested {
            let (prefix, i, j) = split_inline(head, inner);
            PropertyRef {
                prefix,
                delimiter: Some(main.clone()),
                form: ReferenceForm::Nested,
                placeholders: Placeholders::from_tokens(&i, &j),
                scope: Some(scope_of(reference, &segments[1..])?),
            }
        } else if self.delimiters.len() > 1 && *main == self.delimiters[0] {
            PropertyRef {
                prefix: head.to_string(),
                delimiter: Some(main.clone()),
                form: ReferenceForm::Scoped,
                placeholders: Placeholders::from_tokens("", ""),
                scope: Some(scope_of(reference, &segments[1..])?),
            }
        } else {
            let (prefix, i, j) = split_inline(text, main);
            PropertyRef {
                prefix,
                delimiter: Some(main.clone()),
                form: ReferenceForm::Inline,
                placeholders: Placeholders::from_tokens(&i, &j),
                scope: None,
            }
        };

        if parsed.prefix.is_empty() {
            return Err(MixtureError::InvalidReference {
                reference: reference.to_string(),
                reason: "missing property prefix".to_string(),
            });
        }
        Ok(parsed)
    }
}

/// Split `text` into prefix and the last two tokens.
///
/// Missing trailing tokens come back as empty strings; extra leading tokens
/// stay part of the prefix.
fn split_inline(text: &str, delimiter: &str) -> (String, String, String) {
    let tokens: Vec<&str> = text.split(delimiter).map(str::trim).collect();
    match tokens.len() {
        0 | 1 => (text.trim().to_string(), String::new(), String::new()),
        2 => (tokens[0].to_string(), tokens[1].to_string(), String::new()),
        n => (
            tokens[..n - 2].join(delimiter),
            tokens[n - 2].to_string(),
            tokens[n - 1].to_string(),
        ),
    }
}

fn scope_of(reference: &str, segments: &[&str]) -> MixtureResult<Placeholders> {
    if segments.len() > 2 {
        return Err(MixtureError::InvalidReference {
            reference: reference.to_string(),
            reason: format!("expected at most two scope tokens, found {}", segments.len()),
        });
    }
    let i = segments.first().copied().unwrap_or("");
    let j = segments.get(1).copied().unwrap_or("");
    Ok(Placeholders::from_tokens(i, j))
}
