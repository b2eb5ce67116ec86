//! Categorical variables and data sets, and their comparers.
//!
//! A categorical variable maps numeric codes to labels. A categorical data
//! set stores one row of codes per observation, one column per variable.

use crate::array::{check_jagged, check_lengths};
use crate::error::{both_present, ComparisonError, Result};
use crate::scalar::ApproxEq;
use serde::{Deserialize, Serialize};

/// A single category: a numeric code and its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Numeric code of the category
    pub code: f64,

    /// Human-readable label
    pub label: String,
}

impl Category {
    /// Create the category `code` labelled `label`.
    pub fn new(code: f64, label: impl Into<String>) -> Self {
        Self {
            code,
            label: label.into(),
        }
    }
}

/// A named categorical variable with an ordered list of categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVariable")]
pub struct CategoricalVariable {
    /// Name of the variable
    pub name: String,

    categories: Vec<Category>,

    /// Whether categories can still be added
    read_only: bool,
}

#[derive(Deserialize)]
struct RawVariable {
    name: String,
    categories: Vec<Category>,
    #[serde(default)]
    read_only: bool,
}

impl TryFrom<RawVariable> for CategoricalVariable {
    type Error = ComparisonError;

    fn try_from(raw: RawVariable) -> Result<Self> {
        let mut variable = Self::new(raw.name);
        for category in raw.categories {
            variable.add(category.code, category.label)?;
        }
        variable.read_only = raw.read_only;
        Ok(variable)
    }
}

impl CategoricalVariable {
    /// Create a variable with no categories.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
            read_only: false,
        }
    }

    /// Add a category.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if the variable is read-only, or the
    ///   code or the label is already defined
    pub fn add(&mut self, code: f64, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        if self.read_only {
            return Err(ComparisonError::InvalidInput(format!(
                "variable '{}' is read-only",
                self.name
            )));
        }
        if self.categories.iter().any(|c| c.code == code || c.label == label) {
            return Err(ComparisonError::InvalidInput(format!(
                "variable '{}' already defines code {} or label '{}'",
                self.name, code, label
            )));
        }
        self.categories.push(Category::new(code, label));
        Ok(())
    }

    /// Builder form of [`add`](Self::add).
    pub fn with_category(mut self, code: f64, label: impl Into<String>) -> Result<Self> {
        self.add(code, label)?;
        Ok(self)
    }

    /// Prevent further categories from being added.
    pub fn set_read_only(&mut self) {
        self.read_only = true;
    }

    /// Whether the variable is read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Categories in definition order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Code of the category labelled `label`.
    pub fn code_of(&self, label: &str) -> Option<f64> {
        self.categories.iter().find(|c| c.label == label).map(|c| c.code)
    }

    /// Label of the category with code `code`.
    pub fn label_of(&self, code: f64) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.label.as_str())
    }
}

/// A table of categorical observations.
///
/// Deserialized rows pass the same checks as [`CategoricalDataSet::push_row`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataSet")]
pub struct CategoricalDataSet {
    /// Name of the data set
    pub name: String,

    variables: Vec<CategoricalVariable>,

    /// One row of codes per observation
    rows: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawDataSet {
    name: String,
    variables: Vec<CategoricalVariable>,
    #[serde(default)]
    rows: Vec<Vec<f64>>,
}

impl TryFrom<RawDataSet> for CategoricalDataSet {
    type Error = ComparisonError;

    fn try_from(raw: RawDataSet) -> Result<Self> {
        let mut set = Self::new(raw.name, raw.variables);
        for row in raw.rows {
            set.push_row(row)?;
        }
        Ok(set)
    }
}

impl CategoricalDataSet {
    /// Create an empty data set over `variables`.
    pub fn new(name: impl Into<String>, variables: Vec<CategoricalVariable>) -> Self {
        Self {
            name: name.into(),
            variables,
            rows: Vec::new(),
        }
    }

    /// Append an observation given as codes.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if the row length differs from the
    ///   number of variables or a code is not defined by its variable
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.variables.len() {
            return Err(ComparisonError::InvalidInput(format!(
                "row has {} codes for {} variables",
                row.len(),
                self.variables.len()
            )));
        }
        for (code, var) in row.iter().zip(&self.variables) {
            if var.label_of(*code).is_none() {
                return Err(ComparisonError::InvalidInput(format!(
                    "code {} is not a category of '{}'",
                    code, var.name
                )));
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append an observation given as labels.
    pub fn push_labels(&mut self, labels: &[&str]) -> Result<()> {
        let codes = labels
            .iter()
            .zip(&self.variables)
            .map(|(label, var)| {
                var.code_of(label).ok_or_else(|| {
                    ComparisonError::InvalidInput(format!(
                        "label '{}' is not a category of '{}'",
                        label, var.name
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if codes.len() != labels.len() {
            return Err(ComparisonError::InvalidInput(format!(
                "row has {} labels for {} variables",
                labels.len(),
                self.variables.len()
            )));
        }
        self.push_row(codes)
    }

    /// Variables in column order.
    pub fn variables(&self) -> &[CategoricalVariable] {
        &self.variables
    }

    /// Observations as rows of codes.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Check two optional categories: codes within `delta`, labels exactly.
pub fn check_categories(expected: Option<&Category>, actual: Option<&Category>, delta: f64) -> Result<()> {
    let Some((expected, actual)) = both_present("category", expected, actual)? else {
        return Ok(());
    };
    if !expected.code.approx_eq(&actual.code, delta) {
        return Err(ComparisonError::value_mismatch(
            "category code",
            expected.code,
            actual.code,
            delta,
        ));
    }
    check_label("category labels", &expected.label, &actual.label)
}

/// Check two optional categorical variables.
///
/// Names and read-only flags must be equal, and categories must match in
/// definition order.
pub fn check_variables(
    expected: Option<&CategoricalVariable>,
    actual: Option<&CategoricalVariable>,
    delta: f64,
) -> Result<()> {
    let Some((expected, actual)) = both_present("categorical variable", expected, actual)? else {
        return Ok(());
    };
    check_label("variable names", &expected.name, &actual.name)?;
    if expected.read_only != actual.read_only {
        return Err(ComparisonError::FieldMismatch {
            path: format!("{}.read_only", expected.name),
            message: format!("expected {}, actual {}", expected.read_only, actual.read_only),
        });
    }
    check_lengths("category list", expected.categories.len(), actual.categories.len())?;
    for (k, (e, a)) in expected.categories.iter().zip(&actual.categories).enumerate() {
        check_categories(Some(e), Some(a), delta)
            .map_err(|err| err.within(&format!("{}[{}] ", expected.name, k)))?;
    }
    Ok(())
}

/// Check two optional categorical data sets: name, variables, then rows.
pub fn check_data_sets(
    expected: Option<&CategoricalDataSet>,
    actual: Option<&CategoricalDataSet>,
    delta: f64,
) -> Result<()> {
    let Some((expected, actual)) = both_present("categorical data set", expected, actual)? else {
        return Ok(());
    };
    check_label("data set names", &expected.name, &actual.name)?;
    check_lengths("variable list", expected.variables.len(), actual.variables.len())?;
    for (e, a) in expected.variables.iter().zip(&actual.variables) {
        check_variables(Some(e), Some(a), delta)?;
    }
    check_jagged::<f64, _>(Some(&expected.rows[..]), Some(&actual.rows[..]), delta)
}

fn check_label(what: &str, expected: &str, actual: &str) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        tracing::debug!(what, expected, actual, "label mismatch");
        Err(ComparisonError::NameMismatch {
            what: what.to_string(),
            expected: Some(expected.to_string()),
            actual: Some(actual.to_string()),
        })
    }
}
