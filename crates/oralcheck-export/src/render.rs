use serde::Serialize;
use tera::{Context, Tera};

use oralcheck_core::models::item::ItemId;
use oralcheck_core::models::management_plan::ManagementPlan;
use oralcheck_core::models::patient::{Gender, Patient};
use oralcheck_instruments::assessment::Assessment;
use oralcheck_instruments::rules;

use crate::error::ExportError;

const REPORT_TEMPLATE_NAME: &str = "assessment_report.txt";

/// Printable result sheet (Jinja2 syntax, plain text output).
pub const REPORT_TEMPLATE: &str = r#"ORAL FUNCTION ASSESSMENT REPORT
===============================

Patient:        {{ patient.name }} ({{ patient.chart_number }})
{% if patient.age %}Age:            {{ patient.age }}
{% endif %}Gender:         {{ patient.gender }}
Assessed on:    {{ assessment.date }}{% if not assessment.finalized %} (in progress){% endif %}

Measurements
------------
{% for item in assessment.items %}{{ item.number }}. {{ item.label }}: {% if item.recorded %}{{ item.display }}{% if item.affected %}  [affected: {{ item.criterion }}]{% endif %}{% else %}not measured{% endif %}
{% endfor %}
Affected items: {{ assessment.affected_count }} of 7
Result:         {% if assessment.diagnosis %}Oral hypofunction{% else %}No oral hypofunction{% endif %}
{% if plan %}
Management plan ({{ plan.date }})
---------------
{% for entry in plan.entries %}{{ entry.number }}. {{ entry.label }}: {{ entry.directive }}
{% endfor %}{% if plan.notes %}
Notes: {{ plan.notes }}
{% endif %}{% endif %}"#;

#[derive(Serialize)]
struct ReportPatient<'a> {
    name: &'a str,
    chart_number: &'a str,
    age: Option<i16>,
    gender: &'static str,
}

#[derive(Serialize)]
struct ReportItem {
    number: u8,
    label: &'static str,
    recorded: bool,
    display: String,
    affected: bool,
    criterion: &'static str,
}

#[derive(Serialize)]
struct ReportAssessment {
    date: String,
    finalized: bool,
    items: Vec<ReportItem>,
    affected_count: u8,
    diagnosis: bool,
}

#[derive(Serialize)]
struct PlanEntry {
    number: u8,
    label: &'static str,
    directive: &'static str,
}

#[derive(Serialize)]
struct ReportPlan<'a> {
    date: String,
    entries: Vec<PlanEntry>,
    notes: Option<&'a str>,
}

#[derive(Serialize)]
struct ReportContext<'a> {
    patient: ReportPatient<'a>,
    assessment: ReportAssessment,
    plan: Option<ReportPlan<'a>>,
}

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
        Gender::Unspecified => "unspecified",
    }
}

fn report_item(assessment: &Assessment, item: ItemId) -> ReportItem {
    let verdict = assessment.verdict(item);
    ReportItem {
        number: item.number(),
        label: item.label(),
        recorded: verdict.is_some(),
        display: verdict.map(|v| v.display.clone()).unwrap_or_default(),
        affected: verdict.is_some_and(|v| v.affected),
        criterion: verdict
            .and_then(|v| rules::rule_for(item, v.method))
            .map(|rule| rule.criterion)
            .unwrap_or_default(),
    }
}

/// Render the printable report for one assessment, with its plan if any.
pub fn render_report(
    patient: &Patient,
    assessment: &Assessment,
    plan: Option<&ManagementPlan>,
) -> Result<String, ExportError> {
    let context = ReportContext {
        patient: ReportPatient {
            name: &patient.name,
            chart_number: &patient.chart_number,
            age: patient.age_on(assessment.assessment_date()),
            gender: gender_label(patient.gender),
        },
        assessment: ReportAssessment {
            date: assessment.assessment_date().to_string(),
            finalized: assessment.is_finalized(),
            items: ItemId::ALL
                .iter()
                .map(|item| report_item(assessment, *item))
                .collect(),
            affected_count: assessment.affected_count(),
            diagnosis: assessment.diagnosis(),
        },
        plan: plan.map(|plan| ReportPlan {
            date: plan.plan_date.to_string(),
            entries: ItemId::ALL
                .iter()
                .map(|item| PlanEntry {
                    number: item.number(),
                    label: item.label(),
                    directive: plan.directive(*item).label(),
                })
                .collect(),
            notes: plan.notes.as_deref(),
        }),
    };

    let mut tera = Tera::default();
    tera.add_raw_template(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(&context)?;
    let rendered = tera.render(REPORT_TEMPLATE_NAME, &context)?;
    Ok(rendered)
}
