use crate::models::{NamedOil, OilRecommendation};
use crate::Outcome;

/// Renders a successful recommendation as the chat reply text.
pub fn create_recommendation_message(rec: &OilRecommendation) -> String {
    let car = &rec.car_data;
    let spec = &rec.car_specs;

    let mut lines = vec![
        format!(
            "توصية الزيت لسيارة {} {} موديل {} (فئة {})",
            display_token(&car.car_brand),
            display_token(&car.car_model),
            car.year,
            rec.year_category
        ),
        String::new(),
        format!("- سعة الزيت: {} لتر", spec.capacity),
        format!("- اللزوجة الموصى بها: {}", rec.recommended_viscosity),
        format!(
            "- نوع الزيت: {} ({})",
            rec.recommended_type.arabic_label(),
            rec.recommended_type.as_label()
        ),
        format!("- الزيت الأساسي: {}", describe_oil(&rec.primary_oil)),
    ];

    if let Some(alternative) = &rec.alternative_oil {
        lines.push(format!("- البديل: {}", describe_oil(alternative)));
    }

    lines.push(format!("- رقم فلتر الزيت: {}", spec.filter_number));
    if let Some(air_filter) = &rec.air_filter {
        lines.push(format!(
            "- فلتر الهواء: {} (يُغيّر كل {})",
            air_filter.number, air_filter.change_interval
        ));
    }
    lines.push(format!("- فترة تغيير الزيت: {}", spec.change_interval));
    lines.push(format!(
        "- ظروف الاستخدام: {} | الموقع: {}",
        car.conditions.as_label(),
        car.location
    ));

    if !rec.applied_rules.is_empty() {
        lines.push(String::new());
        lines.push("سبب التعديل على مواصفة المصنع:".to_string());
        for rule in &rec.applied_rules {
            lines.push(format!("• {}", rule.arabic_note()));
        }
    }

    if let Some(note) = &rec.approximation_note {
        lines.push(String::new());
        lines.push(note.clone());
    }

    lines.join("\n")
}

/// Recommendation text on success, the error's user message otherwise.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Ok(rec) => create_recommendation_message(rec),
        Err(err) => err.to_string(),
    }
}

fn describe_oil(oil: &NamedOil) -> String {
    let mut text = format!("{} - {} دينار", oil.name, group_thousands(oil.spec.price));
    if let Some(api) = &oil.spec.api_spec {
        text.push_str(&format!(" ({api})"));
    }
    text
}

fn display_token(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
