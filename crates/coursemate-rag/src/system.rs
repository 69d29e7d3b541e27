//! Query facade over the store, tools, generator and sessions.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use coursemate_ai::{AiClient, AiGenerator, GenerationSettings, SessionManager, ToolError};
use coursemate_common::{new_request_id, CoursemateError};
use coursemate_config::CoursemateConfig;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::{CatalogEntry, Course, CourseChunk};
use crate::tools::{ContentSearchTool, OutlineTool, Source, ToolRegistry};
use crate::vector_store::{StoreError, VectorStore};

/// Answer to one query plus the material it drew on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    pub answer: String,
    pub sources: Vec<Source>,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseAnalytics {
    pub total_courses: usize,
    pub course_titles: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub courses_added: usize,
    pub chunks_added: usize,
    pub courses_skipped: usize,
}

pub struct RagSystem {
    store: Arc<VectorStore>,
    registry: ToolRegistry,
    generator: AiGenerator,
    sessions: Mutex<SessionManager>,
}

impl RagSystem {
    /// System over a fresh in-memory store sized from `config.search`.
    pub fn new(config: &CoursemateConfig, client: Arc<dyn AiClient>) -> Result<Self, ToolError> {
        let store = VectorStore::in_memory(
            config.search.embedding_dimensions as usize,
            config.search.max_results as usize,
            config.search.resolve_max_distance as f32,
        );
        Self::with_store(config, client, Arc::new(store))
    }

    pub fn with_store(
        config: &CoursemateConfig,
        client: Arc<dyn AiClient>,
        store: Arc<VectorStore>,
    ) -> Result<Self, ToolError> {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(ContentSearchTool::new(Arc::clone(&store))))?;
        registry.register(Arc::new(OutlineTool::new(Arc::clone(&store))))?;

        let settings = GenerationSettings {
            model: config.ai.model.clone(),
            temperature: config.ai.temperature,
            max_tokens: config.ai.max_tokens,
            max_tool_rounds: config.ai.max_tool_rounds,
        };

        Ok(Self {
            store,
            registry,
            generator: AiGenerator::new(client, settings),
            sessions: Mutex::new(SessionManager::new(config.session.max_history as usize)),
        })
    }

    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    pub fn generator(&self) -> &AiGenerator {
        &self.generator
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.registry
    }

    fn sessions(&self) -> MutexGuard<'_, SessionManager> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn new_session(&self) -> String {
        self.sessions().create_session()
    }

    pub fn clear_session(&self, session_id: &str) {
        self.sessions().clear_session(session_id);
    }

    /// Answer `query` in the given session, creating one when absent.
    pub async fn query(&self, query: &str, session_id: Option<&str>) -> QueryOutcome {
        let request_id = new_request_id();
        let session_id = match session_id {
            Some(id) => id.to_string(),
            None => self.new_session(),
        };
        info!(request_id = %request_id, session_id = %session_id, "Handling query");

        let history = self.sessions().get_conversation_history(Some(&session_id));
        let prompt = format!("Answer this question about course materials: {query}");
        let definitions = self.registry.definitions();

        let answer = self
            .generator
            .generate(&prompt, history.as_deref(), &definitions, Some(&self.registry))
            .await;

        let sources = self.registry.last_sources();
        self.registry.reset_sources();
        self.sessions().add_exchange(&session_id, query, &answer);

        debug!(request_id = %request_id, sources = sources.len(), "Query answered");
        QueryOutcome {
            answer,
            sources,
            session_id,
        }
    }

    /// Store a course's chunks, then its catalog record.
    ///
    /// The catalog record marks the course as loaded, so it is written last.
    pub async fn add_course(&self, course: &Course, chunks: &[CourseChunk]) -> Result<(), StoreError> {
        self.store.add_course_content(chunks).await?;
        self.store.add_course_metadata(course).await?;
        info!(course = %course.title, chunks = chunks.len(), "Added course");
        Ok(())
    }

    /// Ingest a JSON array of pre-chunked courses, skipping titles already stored.
    pub async fn load_catalog(&self, path: &Path) -> Result<CatalogSummary, CoursemateError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&raw)
            .map_err(|e| CoursemateError::Catalog(format!("{}: {e}", path.display())))?;

        let mut known: HashSet<String> = self
            .store
            .get_existing_course_titles()
            .await
            .into_iter()
            .collect();
        let mut summary = CatalogSummary::default();

        for entry in entries {
            if !known.insert(entry.course.title.clone()) {
                debug!(course = %entry.course.title, "Course already loaded, skipping");
                summary.courses_skipped += 1;
                continue;
            }
            self.add_course(&entry.course, &entry.chunks).await?;
            summary.courses_added += 1;
            summary.chunks_added += entry.chunks.len();
        }

        info!(
            path = %path.display(),
            added = summary.courses_added,
            chunks = summary.chunks_added,
            skipped = summary.courses_skipped,
            "Loaded course catalog"
        );
        Ok(summary)
    }

    pub async fn course_analytics(&self) -> CourseAnalytics {
        let course_titles = self.store.get_existing_course_titles().await;
        CourseAnalytics {
            total_courses: course_titles.len(),
            course_titles,
        }
    }

    pub async fn clear_all_data(&self) -> Result<(), StoreError> {
        self.store.clear_all_data().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use coursemate_ai::{
        AiError, AiResponse, ContentBlock, MessageRequest, StopReason, TokenUsage,
    };
    use serde_json::json;

    use super::*;
    use crate::models::Lesson;
    use crate::vector_store::{Collection, MemoryBackend, VectorBackend, CONTENT_COLLECTION};

    struct ScriptedClient {
        responses: Mutex<VecDeque<AiResponse>>,
        requests: Mutex<Vec<MessageRequest>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<AiResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl AiClient for ScriptedClient {
        async fn create_message(&self, request: &MessageRequest) -> Result<AiResponse, AiError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AiError::ApiError("script exhausted".into()))
        }
    }

    fn text(answer: &str) -> AiResponse {
        AiResponse {
            content: vec![ContentBlock::text(answer)],
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    fn search_call(input: serde_json::Value) -> AiResponse {
        AiResponse {
            content: vec![ContentBlock::ToolUse {
                id: "toolu_1".into(),
                name: "search_course_content".into(),
                input,
            }],
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    fn mcp_course() -> (Course, Vec<CourseChunk>) {
        let course = Course {
            title: "MCP: Build Rich-Context AI Apps".into(),
            course_link: Some("https://learn.example/mcp".into()),
            instructor: Some("Elie".into()),
            lessons: vec![Lesson {
                lesson_number: 1,
                title: "Servers".into(),
                lesson_link: Some("https://learn.example/mcp/1".into()),
            }],
        };
        let chunks = vec![CourseChunk {
            content: "An MCP server exposes tools".into(),
            course_title: course.title.clone(),
            lesson_number: Some(1),
            chunk_index: 0,
        }];
        (course, chunks)
    }

    /// Memory backend whose content collection can be switched offline.
    struct FlakyContent {
        inner: MemoryBackend,
        content_down: AtomicBool,
    }

    #[async_trait]
    impl VectorBackend for FlakyContent {
        async fn get_or_create_collection(
            &self,
            name: &str,
        ) -> Result<Arc<dyn Collection>, StoreError> {
            if name == CONTENT_COLLECTION && self.content_down.load(Ordering::SeqCst) {
                return Err(StoreError::Backend(format!("{name} unavailable")));
            }
            self.inner.get_or_create_collection(name).await
        }

        async fn delete_collection(&self, name: &str) -> Result<(), StoreError> {
            self.inner.delete_collection(name).await
        }
    }

    fn system(client: Arc<ScriptedClient>) -> RagSystem {
        RagSystem::new(&CoursemateConfig::default(), client).unwrap()
    }

    #[test]
    fn registers_both_tools() {
        let rag = system(ScriptedClient::new(Vec::new()));
        assert_eq!(
            rag.tools().names(),
            vec!["search_course_content", "get_course_outline"]
        );
    }

    #[tokio::test]
    async fn query_creates_session_and_records_exchange() {
        let client = ScriptedClient::new(vec![text("First answer"), text("Second answer")]);
        let rag = system(client.clone());

        let first = rag.query("What is MCP?", None).await;
        assert_eq!(first.answer, "First answer");
        assert_eq!(first.session_id, "session_1");
        assert!(first.sources.is_empty());

        let second = rag.query("And servers?", Some(&first.session_id)).await;
        assert_eq!(second.answer, "Second answer");

        let requests = client.requests.lock().unwrap();
        assert_eq!(
            requests[0].messages[0],
            coursemate_ai::Message::user_text(
                "Answer this question about course materials: What is MCP?"
            )
        );
        assert!(!requests[0].system.contains("Previous conversation:"));
        assert!(requests[1]
            .system
            .ends_with("Previous conversation:\nUser: What is MCP?\nAssistant: First answer"));
        assert_eq!(requests[0].tools.len(), 2);
    }

    #[tokio::test]
    async fn tool_sources_are_returned_then_reset() {
        let client = ScriptedClient::new(vec![
            search_call(json!({"query": "server", "course_name": "MCP", "lesson_number": 1})),
            text("Servers expose tools."),
        ]);
        let rag = system(client);
        let (course, chunks) = mcp_course();
        rag.add_course(&course, &chunks).await.unwrap();

        let outcome = rag.query("What do MCP servers do?", None).await;
        assert_eq!(outcome.answer, "Servers expose tools.");
        assert_eq!(
            outcome.sources,
            vec![Source {
                text: "MCP: Build Rich-Context AI Apps - Lesson 1".into(),
                url: Some("https://learn.example/mcp/1".into()),
            }]
        );
        assert!(rag.tools().last_sources().is_empty());
    }

    #[tokio::test]
    async fn cleared_session_drops_history() {
        let client = ScriptedClient::new(vec![text("a1"), text("a2")]);
        let rag = system(client.clone());

        let first = rag.query("q1", None).await;
        rag.clear_session(&first.session_id);
        rag.query("q2", Some(&first.session_id)).await;

        let requests = client.requests.lock().unwrap();
        assert!(!requests[1].system.contains("Previous conversation:"));
    }

    #[tokio::test]
    async fn load_catalog_skips_known_titles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let (course, chunks) = mcp_course();
        let entries = vec![
            CatalogEntry {
                course: course.clone(),
                chunks: chunks.clone(),
            },
            CatalogEntry {
                course: Course {
                    title: "Prompt Caching".into(),
                    course_link: None,
                    instructor: None,
                    lessons: Vec::new(),
                },
                chunks: Vec::new(),
            },
        ];
        std::fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();

        let rag = system(ScriptedClient::new(Vec::new()));
        let summary = rag.load_catalog(&path).await.unwrap();
        assert_eq!(
            summary,
            CatalogSummary {
                courses_added: 2,
                chunks_added: 1,
                courses_skipped: 0,
            }
        );

        let again = rag.load_catalog(&path).await.unwrap();
        assert_eq!(again.courses_added, 0);
        assert_eq!(again.courses_skipped, 2);

        let analytics = rag.course_analytics().await;
        assert_eq!(analytics.total_courses, 2);
        assert!(analytics.course_titles.contains(&"Prompt Caching".to_string()));
    }

    #[tokio::test]
    async fn load_catalog_reports_missing_and_malformed_files() {
        let rag = system(ScriptedClient::new(Vec::new()));
        let dir = tempfile::tempdir().unwrap();

        let missing = rag.load_catalog(&dir.path().join("nope.json")).await;
        assert!(matches!(missing, Err(CoursemateError::Io(_))));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        let malformed = rag.load_catalog(&bad).await;
        assert!(matches!(malformed, Err(CoursemateError::Catalog(_))));
    }

    #[tokio::test]
    async fn clear_all_data_resets_analytics() {
        let rag = system(ScriptedClient::new(Vec::new()));
        let (course, chunks) = mcp_course();
        rag.add_course(&course, &chunks).await.unwrap();
        assert_eq!(rag.course_analytics().await.total_courses, 1);

        rag.clear_all_data().await.unwrap();
        assert_eq!(rag.course_analytics().await.total_courses, 0);
    }

    #[tokio::test]
    async fn failed_content_write_leaves_course_unlisted() {
        let backend = Arc::new(FlakyContent {
            inner: MemoryBackend::with_dimensions(128),
            content_down: AtomicBool::new(true),
        });
        let store = Arc::new(VectorStore::new(backend.clone(), 5, 1.0));
        let rag = RagSystem::with_store(
            &CoursemateConfig::default(),
            ScriptedClient::new(Vec::new()),
            store,
        )
        .unwrap();
        let (course, chunks) = mcp_course();

        let err = rag.add_course(&course, &chunks).await.unwrap_err();
        assert!(err.to_string().contains("course_content unavailable"));
        assert_eq!(rag.course_analytics().await.total_courses, 0);

        // A retry is not mistaken for an already loaded course.
        backend.content_down.store(false, Ordering::SeqCst);
        rag.add_course(&course, &chunks).await.unwrap();
        assert_eq!(rag.course_analytics().await.total_courses, 1);
        let hits = rag.store().search("MCP server", None, None, None).await;
        assert_eq!(hits.documents, vec!["An MCP server exposes tools".to_string()]);
    }
}
