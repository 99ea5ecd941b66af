//! Request validation.
//!
//! Walks an arbitrary JSON value and reports every way it departs from the
//! request shape.  Objects are not strict: unknown keys are ignored.  The
//! intent context has no discriminant and passes if any of its three shapes
//! accepts it.

use serde_json::{Map, Value};
use smartchip_config::check_store_fields;
use smartchip_core::issues::{
    NumberRule, Presence, check_array, check_bool, check_enum, check_number, check_object,
    check_string, check_string_array, expect_object,
};
use smartchip_core::{FieldPath, IntentContext, Issues, ModuleKey};

const CHANNELS: [&str; 2] = ["web", "whatsapp"];
const AUTH_STATES: [&str; 2] = ["known", "unknown"];
const ORDER_STATUSES: [&str; 4] = ["processing", "shipped", "delivered", "returned"];
const POLICY_TYPES: [&str; 4] = ["returns", "shipping", "warranty", "general"];

/// Validate `input` as a compute request.
///
/// On failure every violation is reported, in field order.
pub fn validate_request(input: &Value) -> Result<(), Issues> {
    let mut issues = Issues::new();
    let root = FieldPath::root();
    let Some(doc) = expect_object(Some(input), &root, &mut issues) else {
        return issues.into_result();
    };

    check_string(doc, "intent", &root, Presence::Required, &mut issues);
    check_enum(doc, "channel", &root, Presence::Required, &CHANNELS, &mut issues);

    if let Some(stats) = check_object(doc, "stats", &root, Presence::Required, &mut issues) {
        check_stats(stats, &root.key("stats"), &mut issues);
    }

    if let Some(context) = doc.get("context") {
        check_context(context, &root.key("context"), &mut issues);
    }

    if let Some(config) = check_object(doc, "config", &root, Presence::Required, &mut issues) {
        check_config(config, &root.key("config"), &mut issues);
    }

    issues.into_result()
}

fn check_stats(stats: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    let non_negative = NumberRule::any().min(0.0);
    check_number(stats, "price_min", path, Presence::Required, non_negative, issues);
    check_number(stats, "price_max", path, Presence::Required, non_negative, issues);
    check_number(stats, "price_median", path, Presence::Required, non_negative, issues);
    check_number(stats, "rating_coverage", path, Presence::Required, NumberRule::unit(), issues);

    let Some(facets) = check_array(stats, "facets", path, Presence::Required, issues) else {
        return;
    };
    let facets_path = path.key("facets");
    for (i, facet) in facets.iter().enumerate() {
        let facet_path = facets_path.index(i);
        let Some(facet) = expect_object(Some(facet), &facet_path, issues) else {
            continue;
        };
        check_string(facet, "name", &facet_path, Presence::Required, issues);
        let Some(values) = check_array(facet, "values", &facet_path, Presence::Required, issues)
        else {
            continue;
        };
        let values_path = facet_path.key("values");
        for (j, value) in values.iter().enumerate() {
            let value_path = values_path.index(j);
            if let Some(value) = expect_object(Some(value), &value_path, issues) {
                check_string(value, "value", &value_path, Presence::Required, issues);
                check_number(
                    value,
                    "share",
                    &value_path,
                    Presence::Required,
                    NumberRule::unit(),
                    issues,
                );
            }
        }
    }
}

/// One candidate shape of the intent context.
struct ContextShape {
    key: &'static str,
    check: fn(&Map<String, Value>, &FieldPath, &mut Issues),
}

const CONTEXT_SHAPES: [ContextShape; 3] = [
    ContextShape {
        key: IntentContext::ORDER_KEY,
        check: check_order_context,
    },
    ContextShape {
        key: IntentContext::CART_KEY,
        check: check_cart_context,
    },
    ContextShape {
        key: IntentContext::POLICY_KEY,
        check: check_policy_context,
    },
];

/// Union check: passes if any shape accepts the value.
///
/// When none does, the issues of the first shape whose marker key is
/// present are reported; with no marker key at all the context is simply
/// `Invalid input`.
fn check_context(value: &Value, path: &FieldPath, issues: &mut Issues) {
    let Value::Object(ctx) = value else {
        issues.push(path, "Invalid input");
        return;
    };

    let mut attempts = Vec::with_capacity(CONTEXT_SHAPES.len());
    for shape in &CONTEXT_SHAPES {
        let mut shape_issues = Issues::new();
        (shape.check)(ctx, path, &mut shape_issues);
        if shape_issues.is_empty() {
            return;
        }
        attempts.push((shape.key, shape_issues));
    }

    match attempts.into_iter().find(|(key, _)| ctx.contains_key(*key)) {
        Some((_, shape_issues)) => issues.extend(shape_issues),
        None => issues.push(path, "Invalid input"),
    }
}

fn check_order_context(ctx: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    check_enum(ctx, "auth_state", path, Presence::Required, &AUTH_STATES, issues);
    let Some(orders) = check_array(ctx, "recent_orders", path, Presence::Required, issues) else {
        return;
    };
    let orders_path = path.key("recent_orders");
    for (i, order) in orders.iter().enumerate() {
        let order_path = orders_path.index(i);
        if let Some(order) = expect_object(Some(order), &order_path, issues) {
            check_string(order, "id", &order_path, Presence::Required, issues);
            check_enum(order, "status", &order_path, Presence::Required, &ORDER_STATUSES, issues);
        }
    }
}

fn check_cart_context(ctx: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    let non_negative = NumberRule::any().min(0.0);
    check_number(ctx, "cart_count", path, Presence::Required, non_negative, issues);
    check_number(ctx, "cart_value", path, Presence::Required, non_negative, issues);
    check_string(ctx, "currency", path, Presence::Required, issues);
    check_string_array(ctx, "payment_methods", path, Presence::Required, issues);
}

fn check_policy_context(ctx: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    check_enum(ctx, "policy_type", path, Presence::Required, &POLICY_TYPES, issues);
    check_string(ctx, "current_product", path, Presence::Optional, issues);
}

fn check_config(config: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    check_number(
        config,
        "config_version",
        path,
        Presence::Optional,
        NumberRule::positive().integer(),
        issues,
    );

    if let Some(modules) = check_object(config, "modules", path, Presence::Required, issues) {
        let modules_path = path.key("modules");
        for key in ModuleKey::ALL {
            check_bool(modules, key.as_str(), &modules_path, Presence::Required, issues);
        }
    }

    if let Some(t) = check_object(config, "thresholds", path, Presence::Required, issues) {
        let t_path = path.key("thresholds");
        check_number(t, "variance", &t_path, Presence::Required, NumberRule::positive(), issues);
        check_number(t, "facet_threshold", &t_path, Presence::Required, NumberRule::unit(), issues);
        check_number(
            t,
            "rating_threshold",
            &t_path,
            Presence::Required,
            NumberRule::unit(),
            issues,
        );
    }

    if let Some(store) = check_object(config, "store", path, Presence::Optional, issues) {
        check_store_fields(store, &path.key("store"), issues);
    }
}
