//! Relation expansion.
//!
//! For each binding visible to the caller's role, related rows are fetched in
//! one batch for all owner rows and attached under the binding's name. The
//! related rows are expanded in turn against their own model's bindings.
//!
//! A failing related SELECT never fails the request: it is logged and the
//! relation is attached empty.

use oxide_rest_auth::Role;
use oxide_rest_core::clause::{self, ClauseSet, Where};
use oxide_rest_core::Scalar;
use tracing::{debug, warn};

use crate::driver::{BoxFuture, Driver};
use crate::fields::{Binding, Field, RelationLimit};
use crate::model::Model;
use crate::row::{Datum, Row};

const KEY_ALIAS: &str = "__expand_key_";

/// Attaches related rows to query results.
pub struct Expander<'d> {
    driver: &'d dyn Driver,
    role: Role,
}

impl<'d> Expander<'d> {
    /// Creates an expander querying `driver` on behalf of `role`.
    #[must_use]
    pub fn new(driver: &'d dyn Driver, role: Role) -> Self {
        Self { driver, role }
    }

    /// Expands every binding of `model` visible to the role.
    ///
    /// Each visible binding always gets an attribute: a list (possibly empty),
    /// or for single-row bindings an object (possibly empty).
    pub fn expand<'a>(&'a self, model: &'a Model, mut rows: Vec<Row>) -> BoxFuture<'a, Vec<Row>> {
        Box::pin(async move {
            if rows.is_empty() {
                return rows;
            }
            for binding in model.bindings_for(self.role) {
                let related = self.related(binding, &rows).await;
                for row in &mut rows {
                    let datum = attach(binding, row, &related);
                    row.insert(binding.name().to_string(), datum);
                }
            }
            rows
        })
    }

    /// Fetches and expands the related rows of one binding, each paired with
    /// its external key tuple.
    async fn related(&self, binding: &Binding, rows: &[Row]) -> Vec<(Vec<Scalar>, Row)> {
        let internal = binding.internal_keys();
        let external = binding.external_keys();
        if binding.get_limit().is_forbidden()
            || internal.is_empty()
            || internal.len() != external.len()
        {
            return Vec::new();
        }

        let tuples: Vec<_> = rows.iter().filter_map(|row| key_tuple(row, internal)).collect();
        if tuples.is_empty() {
            return Vec::new();
        }

        let model = binding.external_model();
        let readable = model.projection(self.role);
        if readable.is_empty() {
            debug!(binding = %binding.name(), "Related model has no readable fields");
            return Vec::new();
        }

        let mut fields: Vec<_> = external
            .iter()
            .enumerate()
            .map(|(i, key)| clause::Field::new(format!("{} AS {}", key.name(), alias(i))))
            .collect();
        fields.extend(readable);

        let where_clause = external
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let mut column: Vec<Scalar> = Vec::with_capacity(tuples.len());
                for tuple in &tuples {
                    if !column.contains(&tuple[i]) {
                        column.push(tuple[i].clone());
                    }
                }
                Where::in_list(key.name(), column)
            })
            .collect();
        let mut clauses = ClauseSet::filtered(where_clause);
        if let RelationLimit::Rows(n) = binding.get_limit() {
            clauses = clauses.limit(n);
        }

        let found = match self.driver.select(model.table(), &fields, &clauses).await {
            Ok(found) => found,
            Err(e) => {
                warn!(
                    binding = %binding.name(),
                    table = %model.table().name(),
                    error = %e,
                    "Relation expansion failed, attaching no rows"
                );
                return Vec::new();
            }
        };

        let (keys, found): (Vec<_>, Vec<_>) = found
            .into_iter()
            .filter_map(|mut row| {
                let key = (0..external.len())
                    .map(|i| match row.remove(&alias(i)) {
                        Some(Datum::Scalar(s)) if !s.is_null() => Some(normalize(s)),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()?;
                Some((key, row))
            })
            .unzip();

        let expanded = self.expand(model, found).await;
        keys.into_iter().zip(expanded).collect()
    }
}

fn alias(i: usize) -> String {
    format!("{KEY_ALIAS}{i}")
}

/// Integer keys compare by value whatever their signedness.
fn normalize(value: Scalar) -> Scalar {
    match value {
        Scalar::UInt(n) => i64::try_from(n).map_or(Scalar::UInt(n), Scalar::Int),
        other => other,
    }
}

/// The row's values for `keys`, or `None` if any is missing or null.
fn key_tuple(row: &Row, keys: &[Field]) -> Option<Vec<Scalar>> {
    keys.iter()
        .map(|key| match row.get(key.name()) {
            Some(Datum::Scalar(s)) if !s.is_null() => Some(normalize(s.clone())),
            _ => None,
        })
        .collect()
}

fn attach(binding: &Binding, row: &Row, related: &[(Vec<Scalar>, Row)]) -> Datum {
    let key = key_tuple(row, binding.internal_keys());
    let mut matches = related
        .iter()
        .filter(|(k, _)| key.as_ref() == Some(k))
        .map(|(_, r)| r.clone());
    if binding.get_limit().is_single() {
        Datum::Object(matches.next().unwrap_or_default())
    } else {
        Datum::List(matches.collect())
    }
}
