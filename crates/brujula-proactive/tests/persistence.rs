use brujula_core::SuggestionType;
use brujula_proactive::{colombia_offset, ContextStorage, EngineSettings, ProactiveSession};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    colombia_offset()
        .with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

#[tokio::test]
async fn test_context_survives_restart() {
    let dir = TempDir::new().unwrap();
    let storage = ContextStorage::new(dir.path().to_path_buf());
    let settings = EngineSettings::default();

    let mut session = ProactiveSession::new("tienda-cali", settings);
    session.process_user_message_at("¿Cómo entro al mercado de Cali en tecnología?", at(2026, 10, 19));
    assert!(session.dismiss_suggestion("regional:cali"));
    storage.save(&session.snapshot()).await.unwrap();

    let snapshot = storage.load("tienda-cali").await.unwrap();
    let mut restored = ProactiveSession::restore(snapshot, settings);

    assert!(!restored.has_messages());
    let ctx = restored.store().user_context();
    assert_eq!(ctx.region.as_deref(), Some("Cali"));
    assert_eq!(ctx.industry.as_deref(), Some("tecnología"));
    assert_eq!(ctx.interaction_count, 1);
    assert_eq!(restored.store().history().get("cali").unwrap().frequency, 1);

    // the dismissed regional card stays hidden after the restart
    let cards = restored
        .process_user_message_at("Sigo pensando en Cali", at(2026, 10, 20))
        .to_vec();
    assert!(cards.iter().all(|s| s.id != "regional:cali"));
    assert!(cards.iter().all(|s| s.kind != SuggestionType::Regional));
    assert_eq!(restored.store().history().get("cali").unwrap().frequency, 2);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let dir = TempDir::new().unwrap();
    let storage = ContextStorage::new(dir.path().to_path_buf());
    let settings = EngineSettings::default();

    let mut a = ProactiveSession::new("a", settings);
    a.process_user_message_at("moda en Medellín", at(2026, 3, 1));
    let mut b = ProactiveSession::new("b", settings);
    b.process_user_message_at("turismo en Cartagena", at(2026, 3, 1));
    storage.save(&a.snapshot()).await.unwrap();
    storage.save(&b.snapshot()).await.unwrap();

    assert_eq!(storage.list().await.unwrap(), vec!["a".to_string(), "b".to_string()]);
    let loaded_b = storage.load("b").await.unwrap();
    assert_eq!(loaded_b.user_context.region.as_deref(), Some("Cartagena"));

    assert!(storage.delete("a").await.unwrap());
    let fresh = storage.load("a").await.unwrap();
    assert_eq!(fresh.user_context.interaction_count, 0);
    assert!(fresh.user_context.region.is_none());
}
