use venture_screen::workflows::viability::{
    screen_batch, AttributeBag, BatchImporter, Dimension, Industry, RawSignals, ScoreKey,
    ValidationPipeline, ValidationStatus, REALITY_CHECKS,
};

const IDEAS_CSV: &str = "id,idea_text\n\
kanban,\"Generic project management tool with kanban boards and Slack integration, $29/month\"\n\
bikes,\"Inventory forecasting software for independent bike repair shops that predicts which parts to stock from past service tickets, sold to small business owners at $120/month\"\n\
blank,\n";

fn founder_signals() -> RawSignals {
    RawSignals {
        unavoidable: 8.0,
        urgency: 8.0,
        underserved: 8.0,
        feasibility: 8.0,
        pain_gain_ratio: 8.0,
        whitespace: 8.0,
        competition_density: 2.0,
        willingness_to_pay: 8.0,
        interviews: Some(15.0),
        interviews_positive_pct: Some(80.0),
        lois: Some(3.0),
        ltv_estimate: Some(3000.0),
        cac_estimate: Some(400.0),
        channels_clarity: 8.0,
        team_experience: 8.0,
        capital_runway_months: 18.0,
        regulatory_risk: 2.0,
        platform_dependency_risk: 2.0,
        safety_risk: 1.0,
        tam_quality: 8.0,
        growth_quality: 8.0,
        attributes: AttributeBag::default()
            .with(AttributeBag::DISRUPTIVE, 7.0)
            .with(AttributeBag::DEFENSIBLE, 8.0)
            .with(AttributeBag::DISCONTINUOUS, 6.0),
        ..RawSignals::default()
    }
}

#[test]
fn batch_screening_separates_crowded_and_niche_ideas() {
    let ideas = BatchImporter::from_reader(IDEAS_CSV.as_bytes()).expect("batch parses");
    assert_eq!(ideas.len(), 3);

    let outcomes = screen_batch(&ValidationPipeline::default(), &ideas, &founder_signals());

    assert_eq!(outcomes[0].id, "kanban");
    assert_eq!(outcomes[0].status, Some(ValidationStatus::NoGo));
    assert!(outcomes[0].overall.is_some_and(|overall| overall <= 20));

    assert_eq!(outcomes[1].id, "bikes");
    assert_eq!(outcomes[1].status, Some(ValidationStatus::Go));

    assert_eq!(outcomes[2].id, "blank");
    assert!(outcomes[2].status.is_none());
    assert!(outcomes[2].error.is_some());
}

#[test]
fn reality_checks_hold_for_every_registered_category() {
    let pipeline = ValidationPipeline::default();
    let signals = RawSignals {
        unavoidable: 10.0,
        urgency: 10.0,
        whitespace: 10.0,
        competition_density: 0.0,
        ..founder_signals()
    };

    for check in REALITY_CHECKS {
        let text = format!(
            "A new {} software platform for small business teams at $49/month",
            check.triggers[0]
        );
        let Ok(result) = pipeline.validate(&text, &signals) else {
            continue;
        };
        for (key, ceiling) in check.ceilings {
            let value = match key {
                ScoreKey::Overall => f64::from(result.scores.overall),
                ScoreKey::Dimension(dimension) => result.scores.value(*dimension),
            };
            assert!(
                value <= *ceiling,
                "{}: {} = {value} exceeds {ceiling}",
                check.name,
                key.label()
            );
        }
        assert_ne!(result.status, ValidationStatus::Go, "{}", check.name);
    }
}

#[test]
fn result_json_exposes_audit_fields() {
    let result = ValidationPipeline::default()
        .validate(
            "Peer-to-peer lending app that gives small business loans using alternative credit data, with a 2% origination fee",
            &founder_signals(),
        )
        .expect("idea classifies");

    assert_eq!(result.business_dna.industry, Industry::Fintech);
    assert!(result.weights.contains(Dimension::RegulatoryCompliance));

    let json = serde_json::to_value(&result).expect("result serializes");
    for field in [
        "status",
        "reasoning",
        "scores",
        "base_scores",
        "adjustments",
        "weights",
        "business_dna",
        "market_intelligence",
        "competitive_intelligence",
        "unit_economics",
    ] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
    assert_eq!(json["business_dna"]["industry"], "fintech");
}
