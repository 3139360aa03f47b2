//! Find-query resolver
//!
//! Turns the raw, string-typed request parameters into a typed [`FindPlan`].
//! Validation is deliberately asymmetric:
//!
//! - enum tokens (`active`, `deleted`, `brandActive`, `categoryActive`) and
//!   id lists fail with collected field violations so the caller sees every
//!   bad field at once;
//! - `orderBy`, `page` and `pageSize` never fail: anything malformed is
//!   silently replaced by the default.

use serde::Deserialize;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::FieldViolation;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MIN_PAGE_SIZE: u64 = 1;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Raw find parameters exactly as they arrive on the wire.
///
/// Everything is a string so the resolver, not the deserializer, owns the
/// validation rules.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Free-text search over product names
    pub query: Option<String>,
    /// Product active filter: `active`, `inactive` or `all`
    pub active: Option<String>,
    /// Product soft-delete filter: `not_deleted`, `deleted` or `all`
    pub deleted: Option<String>,
    /// Brand active filter: `active`, `inactive` or `all`
    pub brand_active: Option<String>,
    /// Category active filter: `active`, `inactive` or `all`
    pub category_active: Option<String>,
    /// Comma-separated brand UUIDs
    pub brand_ids: Option<String>,
    /// Comma-separated category UUIDs
    pub category_ids: Option<String>,
    /// Comma-separated `column_direction` tokens, e.g. `name_desc`
    pub order_by: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Tri-state filter over an `active` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ActiveFilter {
    #[default]
    Active,
    Inactive,
    All,
}

/// Tri-state filter over the soft-delete marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DeletedFilter {
    #[default]
    NotDeleted,
    Deleted,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum OrderColumn {
    Name,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Fully-resolved find plan.
///
/// Guarantees: ordering only contains valid columns with no duplicates,
/// `page >= 1` and `page_size` lies within `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FindPlan {
    /// Normalized text predicate; `None` when no text search applies
    pub text: Option<String>,
    pub active: ActiveFilter,
    pub deleted: DeletedFilter,
    pub brand_active: ActiveFilter,
    pub category_active: ActiveFilter,
    /// Brand membership predicate; `None` means unconstrained
    pub brand_ids: Option<Vec<Uuid>>,
    /// Category membership predicate; `None` means unconstrained
    pub category_ids: Option<Vec<Uuid>>,
    pub order_by: Vec<(OrderColumn, OrderDirection)>,
    pub page: u64,
    pub page_size: u64,
}

impl FindPlan {
    /// The ordering as wire-format tokens, for echoing in responses
    pub fn order_tokens(&self) -> Vec<String> {
        self.order_by
            .iter()
            .map(|(col, dir)| format!("{}_{}", col, dir))
            .collect()
    }

    /// Row offset of the requested page. Saturates instead of
    /// overflowing, since any valid `page` value is accepted here.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for FindPlan {
    fn default() -> Self {
        Self {
            text: None,
            active: ActiveFilter::Active,
            deleted: DeletedFilter::NotDeleted,
            brand_active: ActiveFilter::All,
            category_active: ActiveFilter::All,
            brand_ids: None,
            category_ids: None,
            order_by: default_order(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_order() -> Vec<(OrderColumn, OrderDirection)> {
    vec![
        (OrderColumn::Name, OrderDirection::Asc),
        (OrderColumn::Active, OrderDirection::Asc),
    ]
}

/// Resolve raw parameters into a [`FindPlan`].
///
/// Violations are collected across all strict fields before returning, so
/// a request with a bad `active` token and a bad `brandIds` entry reports
/// both.
pub fn resolve(query: ProductQuery) -> Result<FindPlan, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let text = normalize_text(query.query.as_deref());

    let active = parse_token::<ActiveFilter>("active", query.active.as_deref(), &mut violations)
        .unwrap_or(ActiveFilter::Active);
    let deleted = parse_token::<DeletedFilter>("deleted", query.deleted.as_deref(), &mut violations)
        .unwrap_or(DeletedFilter::NotDeleted);
    let brand_active =
        parse_token::<ActiveFilter>("brandActive", query.brand_active.as_deref(), &mut violations)
            .unwrap_or(ActiveFilter::All);
    let category_active = parse_token::<ActiveFilter>(
        "categoryActive",
        query.category_active.as_deref(),
        &mut violations,
    )
    .unwrap_or(ActiveFilter::All);

    let brand_ids = parse_id_list("brandIds", query.brand_ids.as_deref(), &mut violations);
    let category_ids = parse_id_list("categoryIds", query.category_ids.as_deref(), &mut violations);

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(FindPlan {
        text,
        active,
        deleted,
        brand_active,
        category_active,
        brand_ids,
        category_ids,
        order_by: parse_order(query.order_by.as_deref()),
        page: parse_page(query.page.as_deref()),
        page_size: parse_page_size(query.page_size.as_deref()),
    })
}

/// Trim, collapse whitespace runs and strip wildcard characters from the
/// ends. Returns `None` for empty or whitespace-only input.
fn normalize_text(raw: Option<&str>) -> Option<String> {
    let raw = raw?;

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = collapsed
        .trim_matches(|c| c == '%' || c == '*')
        .trim()
        .to_string();

    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}

/// Strict token parse. Absent input yields `None` (caller applies the
/// default); unrecognized input records a violation.
fn parse_token<T: FromStr>(
    field: &str,
    raw: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    let raw = raw?;

    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            violations.push(FieldViolation::unrecognized(field, raw));
            None
        }
    }
}

/// Strict comma-separated UUID list. Any malformed element records a
/// violation for the whole field.
fn parse_id_list(
    field: &str,
    raw: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<Vec<Uuid>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let mut ids = Vec::new();
    for part in raw.split(',') {
        match Uuid::parse_str(part.trim()) {
            Ok(id) => ids.push(id),
            Err(_) => {
                violations.push(FieldViolation::unrecognized(field, part.trim()));
                return None;
            }
        }
    }

    Some(ids)
}

/// Lenient ordering parse. Any malformed token, unknown column or
/// duplicated column silently substitutes the default ordering.
fn parse_order(raw: Option<&str>) -> Vec<(OrderColumn, OrderDirection)> {
    let Some(raw) = raw else {
        return default_order();
    };

    let mut order = Vec::new();

    for token in raw.split(',') {
        let token = token.trim();

        // Tokens look like `name_asc`; the column itself never contains
        // an underscore, so split on the last one.
        let Some((col, dir)) = token.rsplit_once('_') else {
            return default_order();
        };

        let (Ok(col), Ok(dir)) = (col.parse::<OrderColumn>(), dir.parse::<OrderDirection>())
        else {
            return default_order();
        };

        if order.iter().any(|(existing, _)| *existing == col) {
            return default_order();
        }

        order.push((col, dir));
    }

    if order.is_empty() {
        default_order()
    } else {
        order
    }
}

/// Lenient page parse: anything that is not a positive integer becomes
/// the first page.
fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|p| p.trim().parse::<u64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(DEFAULT_PAGE)
}

/// Lenient page-size parse: numeric values clamp into bounds, anything
/// else becomes the default.
fn parse_page_size(raw: Option<&str>) -> u64 {
    match raw.map(str::trim).and_then(|p| p.parse::<i64>().ok()) {
        Some(size) if size < MIN_PAGE_SIZE as i64 => MIN_PAGE_SIZE,
        Some(size) if size > MAX_PAGE_SIZE as i64 => MAX_PAGE_SIZE,
        Some(size) => size as u64,
        None => DEFAULT_PAGE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q() -> ProductQuery {
        ProductQuery::default()
    }

    #[test]
    fn empty_query_resolves_to_defaults() {
        let plan = resolve(q()).unwrap();
        assert_eq!(plan, FindPlan::default());
    }

    #[test]
    fn text_is_trimmed_and_collapsed() {
        let plan = resolve(ProductQuery {
            query: Some("  bookshelf   speaker  ".into()),
            ..q()
        })
        .unwrap();

        assert_eq!(plan.text.as_deref(), Some("bookshelf speaker"));
    }

    #[test]
    fn wildcards_are_stripped_from_ends_only() {
        let plan = resolve(ProductQuery {
            query: Some("%%spea*ker**".into()),
            ..q()
        })
        .unwrap();

        assert_eq!(plan.text.as_deref(), Some("spea*ker"));
    }

    #[test]
    fn whitespace_only_text_means_no_predicate() {
        let plan = resolve(ProductQuery {
            query: Some("   ".into()),
            ..q()
        })
        .unwrap();

        assert_eq!(plan.text, None);
    }

    #[test]
    fn valid_tokens_are_accepted() {
        let plan = resolve(ProductQuery {
            active: Some("all".into()),
            deleted: Some("deleted".into()),
            brand_active: Some("inactive".into()),
            ..q()
        })
        .unwrap();

        assert_eq!(plan.active, ActiveFilter::All);
        assert_eq!(plan.deleted, DeletedFilter::Deleted);
        assert_eq!(plan.brand_active, ActiveFilter::Inactive);
        assert_eq!(plan.category_active, ActiveFilter::All);
    }

    #[test]
    fn unknown_token_names_the_field() {
        let err = resolve(ProductQuery {
            active: Some("enabled".into()),
            ..q()
        })
        .unwrap_err();

        assert_eq!(err.len(), 1);
        assert_eq!(err[0].field, "active");
    }

    #[test]
    fn violations_are_collected_not_short_circuited() {
        let err = resolve(ProductQuery {
            active: Some("bogus".into()),
            deleted: Some("bogus".into()),
            brand_ids: Some("not-a-uuid".into()),
            ..q()
        })
        .unwrap_err();

        let fields: Vec<_> = err.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["active", "deleted", "brandIds"]);
    }

    #[test]
    fn id_lists_parse_comma_separated_uuids() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        let plan = resolve(ProductQuery {
            brand_ids: Some(format!("{}, {}", a, b)),
            ..q()
        })
        .unwrap();

        assert_eq!(plan.brand_ids, Some(vec![a, b]));
    }

    #[test]
    fn one_malformed_id_fails_the_whole_list() {
        let err = resolve(ProductQuery {
            category_ids: Some(format!("{},oops", Uuid::now_v7())),
            ..q()
        })
        .unwrap_err();

        assert_eq!(err[0].field, "categoryIds");
    }

    #[test]
    fn order_by_parses_valid_tokens() {
        let plan = resolve(ProductQuery {
            order_by: Some("active_desc, name_asc".into()),
            ..q()
        })
        .unwrap();

        assert_eq!(
            plan.order_by,
            vec![
                (OrderColumn::Active, OrderDirection::Desc),
                (OrderColumn::Name, OrderDirection::Asc),
            ]
        );
    }

    #[test]
    fn unknown_order_column_falls_back_to_default() {
        let plan = resolve(ProductQuery {
            order_by: Some("price_asc".into()),
            ..q()
        })
        .unwrap();

        assert_eq!(plan.order_by, default_order());
    }

    #[test]
    fn duplicate_order_column_falls_back_to_default() {
        let plan = resolve(ProductQuery {
            order_by: Some("name_asc,name_desc".into()),
            ..q()
        })
        .unwrap();

        assert_eq!(plan.order_by, default_order());
    }

    #[test]
    fn malformed_order_token_falls_back_to_default() {
        let plan = resolve(ProductQuery {
            order_by: Some("name".into()),
            ..q()
        })
        .unwrap();

        assert_eq!(plan.order_by, default_order());
    }

    #[test]
    fn page_defaults_for_garbage_input() {
        assert_eq!(
            resolve(ProductQuery {
                page: Some("abc".into()),
                ..q()
            })
            .unwrap()
            .page,
            DEFAULT_PAGE
        );

        assert_eq!(
            resolve(ProductQuery {
                page: Some("0".into()),
                ..q()
            })
            .unwrap()
            .page,
            DEFAULT_PAGE
        );

        assert_eq!(
            resolve(ProductQuery {
                page: Some("7".into()),
                ..q()
            })
            .unwrap()
            .page,
            7
        );
    }

    #[test]
    fn page_size_clamps_into_bounds() {
        assert_eq!(
            resolve(ProductQuery {
                page_size: Some("1000".into()),
                ..q()
            })
            .unwrap()
            .page_size,
            MAX_PAGE_SIZE
        );

        assert_eq!(
            resolve(ProductQuery {
                page_size: Some("0".into()),
                ..q()
            })
            .unwrap()
            .page_size,
            MIN_PAGE_SIZE
        );

        assert_eq!(
            resolve(ProductQuery {
                page_size: Some("-5".into()),
                ..q()
            })
            .unwrap()
            .page_size,
            MIN_PAGE_SIZE
        );

        assert_eq!(
            resolve(ProductQuery {
                page_size: Some("nope".into()),
                ..q()
            })
            .unwrap()
            .page_size,
            DEFAULT_PAGE_SIZE
        );
    }

    #[test]
    fn order_tokens_echo_wire_format() {
        let plan = FindPlan::default();
        assert_eq!(plan.order_tokens(), vec!["name_asc", "active_asc"]);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let plan = resolve(ProductQuery {
            page: Some(u64::MAX.to_string()),
            page_size: Some("100".into()),
            ..q()
        })
        .unwrap();

        assert_eq!(plan.page, u64::MAX);
        assert_eq!(plan.offset(), u64::MAX);

        let plan = resolve(ProductQuery {
            page: Some("3".into()),
            page_size: Some("10".into()),
            ..q()
        })
        .unwrap();
        assert_eq!(plan.offset(), 20);
    }
}
