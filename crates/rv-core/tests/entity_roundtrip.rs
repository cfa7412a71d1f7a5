//! Serde roundtrip and JsonSchema validation tests for the record types.

use rv_core::{
    Answer, Bullet, Card, Policy, PolicyDocument, RecordId, Rule, RulesResponse, SearchLogEntry,
};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_rule() -> Rule {
    Rule {
        id: RecordId::from(1_u64),
        title: "Shift handover".into(),
        slug: Some("shift-handover".into()),
        category: Some("Routine".into()),
        body: Some("Arrive 10 minutes early".into()),
        cards: vec![Card {
            id: RecordId::from(3_u64),
            title: "Checklist".into(),
            bullets: vec![Bullet {
                id: RecordId::from(8_u64),
                text: "Sign the logbook".into(),
                tags: vec!["routine".into()],
            }],
        }],
    }
}

roundtrip_and_validate!(rule_roundtrip, Rule, sample_rule());

roundtrip_and_validate!(
    rules_response_roundtrip,
    RulesResponse,
    RulesResponse {
        results: vec![sample_rule()],
    }
);

roundtrip_and_validate!(
    search_log_roundtrip,
    SearchLogEntry,
    SearchLogEntry::zero_results("zzz-no-match")
);

roundtrip_and_validate!(
    policy_document_roundtrip,
    PolicyDocument,
    PolicyDocument {
        policies: vec![Policy {
            id: Some(RecordId::from("pol-1")),
            titulo: "Descanso".into(),
            perguntas: vec!["Posso fazer pausa?".into()],
            categoria: "Rotina".into(),
            perfil: vec!["Todos".into()],
            resposta: Answer::Items(vec!["Revezamento a cada 2h".into()]),
            excecoes: Vec::new(),
            responsavel: "Coordenação".into(),
            fonte_oficial: None,
            versao: "1.0".into(),
            vigencia_inicio: "2024-01-01".into(),
            vigencia_fim: None,
            ultima_atualizacao: "2024-02-01".into(),
        }],
    }
);

#[test]
fn search_log_wire_shape() {
    let value = serde_json::to_value(SearchLogEntry::zero_results("zzz-no-match")).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "term": "zzz-no-match", "results_count": 0 })
    );
}
