use crate::infra::{evaluation_profile, parse_timestamp, InMemoryDispatcher};
use chrono::{DateTime, Utc};
use clap::Args;
use lead_intake::error::AppError;
use lead_intake::workflows::inquiry::{
    evaluate, DeliveryRoute, FallbackContact, FixedClock, InquiryInput, InquiryIntakeService,
    IntakeServiceError, SystemClock,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// JSON inquiry file (camelCase fields); takes precedence over the field flags
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Contact name
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Contact e-mail address
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) business: Option<String>,
    /// Business type key, e.g. local-business or e-commerce
    #[arg(long)]
    pub(crate) business_type: Option<String>,
    /// Budget range key, e.g. 1000-5000 or over-10000
    #[arg(long)]
    pub(crate) budget: Option<String>,
    /// Timeline key, e.g. asap or within-month
    #[arg(long)]
    pub(crate) timeline: Option<String>,
    /// Current website status key, e.g. none or outdated
    #[arg(long)]
    pub(crate) website: Option<String>,
    /// Requested service (repeatable)
    #[arg(long = "service")]
    pub(crate) services: Vec<String>,
    #[arg(long)]
    pub(crate) details: Option<String>,
    /// Scoring preset (standard or quote-desk)
    #[arg(long)]
    pub(crate) profile: Option<String>,
    /// Submission time (RFC 3339). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) submitted_at: Option<DateTime<Utc>>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Scoring preset (standard or quote-desk)
    #[arg(long)]
    pub(crate) profile: Option<String>,
    /// Print the full dispatched payloads as JSON
    #[arg(long)]
    pub(crate) show_payloads: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = evaluation_profile(args.profile.as_deref())?;
    let submitted_at = args.submitted_at;
    let input = load_inquiry(args)?;

    let result = match submitted_at {
        Some(instant) => evaluate(&input, &config, &FixedClock(instant))?,
        None => evaluate(&input, &config, &SystemClock)?,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn load_inquiry(args: ScoreArgs) -> Result<InquiryInput, AppError> {
    if let Some(path) = args.input {
        let raw = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&raw)?);
    }

    Ok(InquiryInput {
        contact_name: args.name.unwrap_or_default(),
        contact_email: args.email.unwrap_or_default(),
        contact_phone: args.phone,
        business_name: args.business,
        business_type: args.business_type,
        budget_range: args.budget,
        timeline: args.timeline,
        current_website_status: args.website,
        requested_services: args.services,
        project_details: args.details,
    })
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = evaluation_profile(args.profile.as_deref())?;
    let thresholds = config.thresholds;
    let dispatcher = Arc::new(InMemoryDispatcher::default());
    let service = InquiryIntakeService::new(
        dispatcher.clone(),
        config,
        DeliveryRoute::default(),
        FallbackContact::default(),
    );

    println!(
        "Lead intake demo (HIGH >= {}, MEDIUM >= {})",
        thresholds.high, thresholds.medium
    );

    for input in sample_inquiries() {
        let label = input
            .business_name
            .clone()
            .unwrap_or_else(|| input.contact_name.clone());

        match service.submit(&input) {
            Ok(receipt) => {
                let view = receipt.status_view();
                println!(
                    "- {label}: {} priority, score {}, respond within {}",
                    view.tier, view.score, view.response_time
                );
                for component in &receipt.evaluation.components {
                    println!(
                        "    {:<24} {:>3}  {}",
                        component.dimension.to_string(),
                        component.points,
                        component.notes
                    );
                }
                println!("    confirmation: {}", view.message);
            }
            Err(IntakeServiceError::Validation(err)) => {
                println!("- {label}: rejected ({err})");
            }
            Err(err @ IntakeServiceError::Delivery { .. }) => {
                println!("- {label}: {err}");
                println!("    {}", service.fallback().failure_message());
            }
        }
    }

    let events = dispatcher.events();
    println!("\nDispatched messages: {}", events.len());
    for (route, payload) in &events {
        println!(
            "- {} via {}/{}",
            payload.kind().label(),
            route.service_id,
            route.template_id
        );
        if args.show_payloads {
            println!("{}", serde_json::to_string_pretty(payload)?);
        }
    }

    Ok(())
}

fn sample_inquiries() -> Vec<InquiryInput> {
    vec![
        InquiryInput {
            contact_name: "Ana Ruiz".to_string(),
            contact_email: "ana@ruizcandles.example".to_string(),
            contact_phone: Some("(555) 014-2231".to_string()),
            business_name: Some("Ruiz Candle Co.".to_string()),
            business_type: Some("e-commerce".to_string()),
            budget_range: Some("over-10000".to_string()),
            timeline: Some("asap".to_string()),
            current_website_status: Some("none".to_string()),
            requested_services: vec![
                "E-commerce Store".to_string(),
                "SEO Optimization".to_string(),
            ],
            project_details: Some("Launching a storefront before the holiday season.".to_string()),
        },
        InquiryInput {
            contact_name: "Theo Park".to_string(),
            contact_email: "theo@parkdental.example".to_string(),
            business_name: Some("Park Family Dental".to_string()),
            business_type: Some("professional-services".to_string()),
            budget_range: Some("1000-5000".to_string()),
            timeline: Some("within-quarter".to_string()),
            current_website_status: Some("diy-platform".to_string()),
            requested_services: vec!["Website Redesign".to_string()],
            ..InquiryInput::default()
        },
        InquiryInput {
            contact_name: "Lena Brooks".to_string(),
            contact_email: "lena@example.com".to_string(),
            business_type: Some("nonprofit".to_string()),
            budget_range: Some("under-1000".to_string()),
            timeline: Some("exploring".to_string()),
            current_website_status: Some("professional".to_string()),
            ..InquiryInput::default()
        },
        InquiryInput {
            contact_name: "Unnamed Visitor".to_string(),
            contact_email: "  ".to_string(),
            business_type: Some("startup".to_string()),
            ..InquiryInput::default()
        },
    ]
}
