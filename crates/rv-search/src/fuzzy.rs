//! Fuzzy search over the static policies document.
//!
//! Matching is delegated to `nucleo-matcher`. A field's raw score is
//! normalized against the score the query earns when matched against
//! itself, so `1.0` is a perfect word-start match and scattered matches
//! fall towards `0.0`. A policy is kept when its best normalized score is
//! at least `1 - threshold`.

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str, chars};
use rv_core::{Policy, PolicyDocument};
use serde::Serialize;

use crate::error::SearchError;

/// Searchable keys of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyField {
    Titulo,
    Perguntas,
    Categoria,
    Perfil,
    Resposta,
}

impl PolicyField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Titulo => "titulo",
            Self::Perguntas => "perguntas",
            Self::Categoria => "categoria",
            Self::Perfil => "perfil",
            Self::Resposta => "resposta",
        }
    }
}

/// Lowercase and strip Latin diacritics.
fn fold(text: &str) -> String {
    text.chars()
        .map(chars::normalize)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Query expansion table: when the folded query contains a key, each of
/// its synonyms is tried as an alternative query.
#[derive(Debug, Clone)]
pub struct Synonyms {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for Synonyms {
    fn default() -> Self {
        Self::new([
            (
                "passagem de plantao",
                &["passagem de turno", "entrega de plantao", "troca de plantao"][..],
            ),
            (
                "apoio policial",
                &["policia", "guarnição", "segurança pública", "pm"][..],
            ),
            ("descanso", &["intervalo", "pausa", "revezamento"][..]),
            (
                "horario de chegada",
                &["pontualidade", "atraso", "inicio do plantao"][..],
            ),
            ("troca de plantao", &["cobertura de plantao", "permuta"][..]),
            (
                "radio",
                &["comunicação", "conduta no rádio", "etiqueta no rádio"][..],
            ),
        ])
    }
}

impl Synonyms {
    #[must_use]
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, values)| {
                    (fold(key), values.iter().map(|v| (*v).to_string()).collect())
                })
                .collect(),
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The query itself followed by every applicable synonym.
    #[must_use]
    pub fn expand(&self, query: &str) -> Vec<String> {
        let folded = fold(query);
        let mut out = vec![query.to_string()];
        for (key, values) in &self.entries {
            if folded.contains(key.as_str()) {
                for value in values {
                    if !out.contains(value) {
                        out.push(value.clone());
                    }
                }
            }
        }
        out
    }
}

/// Inputs of [`PolicyIndex::search`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyQuery<'a> {
    pub text: &'a str,
    /// Exact category filter.
    pub categoria: Option<&'a str>,
    /// Profile filter; policies for `"Todos"` always pass.
    pub perfil: Option<&'a str>,
}

/// A policy that passed the query.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyHit<'a> {
    pub policy: &'a Policy,
    /// Normalized relevance in `0.0..=1.0`.
    pub score: f64,
    /// Best-scoring key; `None` when no text query was given.
    pub field: Option<PolicyField>,
}

#[derive(Debug, Clone)]
struct IndexedPolicy {
    policy: Policy,
    resposta_plain: String,
}

impl IndexedPolicy {
    fn keys(&self) -> impl Iterator<Item = (PolicyField, &str)> {
        std::iter::once((PolicyField::Titulo, self.policy.titulo.as_str()))
            .chain(
                self.policy
                    .perguntas
                    .iter()
                    .map(|p| (PolicyField::Perguntas, p.as_str())),
            )
            .chain(std::iter::once((
                PolicyField::Categoria,
                self.policy.categoria.as_str(),
            )))
            .chain(
                self.policy
                    .perfil
                    .iter()
                    .map(|p| (PolicyField::Perfil, p.as_str())),
            )
            .chain(std::iter::once((
                PolicyField::Resposta,
                self.resposta_plain.as_str(),
            )))
    }
}

/// One compiled alternative of the query.
struct Probe {
    atom: Atom,
    perfect: f64,
}

impl Probe {
    fn compile(text: &str, matcher: &mut Matcher) -> Option<Self> {
        let atom = Atom::new(
            text,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
            true,
        );
        let mut buf = Vec::new();
        let perfect = atom.score(Utf32Str::new(text, &mut buf), matcher)?;
        (perfect > 0).then(|| Self {
            atom,
            perfect: f64::from(perfect),
        })
    }

    fn score(&self, haystack: &str, matcher: &mut Matcher, buf: &mut Vec<char>) -> f64 {
        if haystack.is_empty() {
            return 0.0;
        }
        self.atom
            .score(Utf32Str::new(haystack, buf), matcher)
            .map_or(0.0, |raw| (f64::from(raw) / self.perfect).min(1.0))
    }
}

/// Policies loaded once and searched in memory.
#[derive(Debug, Clone)]
pub struct PolicyIndex {
    entries: Vec<IndexedPolicy>,
    threshold: f64,
    synonyms: Synonyms,
}

impl PolicyIndex {
    /// Build an index with the default synonym table.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] if `threshold` is outside `0.0..=1.0`.
    pub fn new(document: PolicyDocument, threshold: f64) -> Result<Self, SearchError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SearchError::InvalidQuery(format!(
                "fuzzy threshold must be within 0.0..=1.0, got {threshold}"
            )));
        }
        let entries = document
            .policies
            .into_iter()
            .map(|policy| IndexedPolicy {
                resposta_plain: policy.resposta.plain(),
                policy,
            })
            .collect::<Vec<_>>();
        tracing::debug!(policies = entries.len(), threshold, "policy index built");
        Ok(Self {
            entries,
            threshold,
            synonyms: Synonyms::default(),
        })
    }

    /// Decode `payload` and build an index.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Document`] for malformed JSON, or see [`PolicyIndex::new`].
    pub fn from_json(payload: &str, threshold: f64) -> Result<Self, SearchError> {
        Self::new(PolicyDocument::from_json(payload)?, threshold)
    }

    #[must_use]
    pub fn with_synonyms(mut self, synonyms: Synonyms) -> Self {
        self.synonyms = synonyms;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .entries
            .iter()
            .map(|e| e.policy.categoria.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Distinct profiles, sorted.
    #[must_use]
    pub fn profiles(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .entries
            .iter()
            .flat_map(|e| e.policy.perfil.iter().map(String::as_str))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Run `query`. Hits are ordered by score, ties in document order.
    #[must_use]
    pub fn search(&self, query: &PolicyQuery<'_>) -> Vec<PolicyHit<'_>> {
        let text = query.text.trim();
        let mut hits: Vec<PolicyHit<'_>> = if text.is_empty() {
            self.entries
                .iter()
                .map(|e| PolicyHit {
                    policy: &e.policy,
                    score: 1.0,
                    field: None,
                })
                .collect()
        } else {
            self.fuzzy_hits(text)
        };

        if let Some(categoria) = query.categoria.filter(|c| !c.is_empty()) {
            hits.retain(|hit| hit.policy.categoria == categoria);
        }
        if let Some(perfil) = query.perfil.filter(|p| !p.is_empty()) {
            hits.retain(|hit| hit.policy.applies_to(perfil));
        }
        hits
    }

    fn fuzzy_hits(&self, text: &str) -> Vec<PolicyHit<'_>> {
        let mut matcher = Matcher::new(Config::DEFAULT);
        let probes: Vec<Probe> = self
            .synonyms
            .expand(text)
            .iter()
            .filter_map(|alt| Probe::compile(alt, &mut matcher))
            .collect();
        let cutoff = 1.0 - self.threshold;
        let mut buf = Vec::new();

        let mut hits = Vec::new();
        for entry in &self.entries {
            let mut best: Option<(f64, PolicyField)> = None;
            for (field, haystack) in entry.keys() {
                for probe in &probes {
                    let score = probe.score(haystack, &mut matcher, &mut buf);
                    if best.is_none_or(|(current, _)| score > current) {
                        best = Some((score, field));
                    }
                }
            }
            if let Some((score, field)) = best.filter(|(score, _)| *score >= cutoff) {
                hits.push(PolicyHit {
                    policy: &entry.policy,
                    score,
                    field: Some(field),
                });
            }
        }
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        tracing::debug!(query = text, alternatives = probes.len(), hits = hits.len(), "policy search");
        hits
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"[
        {
            "id": "p0",
            "titulo": "Passagem de plantão",
            "perguntas": ["Como faço a passagem de turno?"],
            "categoria": "Rotina",
            "perfil": ["Enfermagem"],
            "resposta": ["Chegue 10 minutos antes"]
        },
        {
            "id": "p1",
            "titulo": "Acionamento da polícia",
            "perguntas": ["Quando chamar a PM?"],
            "categoria": "Segurança",
            "perfil": ["Todos"],
            "resposta": "<p>Ligue para a central</p>"
        },
        {
            "id": "p2",
            "titulo": "Revezamento de descansos",
            "perguntas": ["Posso fazer pausa?"],
            "categoria": "Rotina",
            "perfil": ["Condutor"],
            "resposta": "Intervalos de 15 minutos"
        }
    ]"#;

    fn index() -> PolicyIndex {
        PolicyIndex::from_json(FIXTURE, 0.35).expect("fixture indexes")
    }

    fn ids(hits: &[PolicyHit<'_>]) -> Vec<String> {
        hits.iter()
            .filter_map(|h| h.policy.id.as_ref().map(ToString::to_string))
            .collect()
    }

    #[test]
    fn accent_insensitive_title_match() {
        let index = index();
        let hits = index.search(&PolicyQuery {
            text: "plantao",
            ..Default::default()
        });
        assert_eq!(ids(&hits), ["p0"]);
        assert_eq!(hits[0].field, Some(PolicyField::Titulo));
        assert!(hits[0].score > 0.99);
    }

    #[test]
    fn query_case_is_ignored() {
        let index = index();
        for text in ["plantao", "Plantao", "PLANTAO"] {
            let hits = index.search(&PolicyQuery {
                text,
                ..Default::default()
            });
            assert_eq!(ids(&hits), ["p0"], "query {text:?}");
        }
    }

    #[test]
    fn synonyms_widen_the_query() {
        let index = index();
        let query = PolicyQuery {
            text: "apoio policial",
            ..Default::default()
        };
        let hits = index.search(&query);
        assert_eq!(ids(&hits).first().map(String::as_str), Some("p1"));

        let plain = index.clone().with_synonyms(Synonyms::empty());
        assert!(!ids(&plain.search(&query)).contains(&"p1".to_string()));
    }

    #[test]
    fn empty_query_with_filters_keeps_document_order() {
        let index = index();
        let by_category = index.search(&PolicyQuery {
            categoria: Some("Rotina"),
            ..Default::default()
        });
        assert_eq!(ids(&by_category), ["p0", "p2"]);

        let by_profile = index.search(&PolicyQuery {
            perfil: Some("Condutor"),
            ..Default::default()
        });
        assert_eq!(ids(&by_profile), ["p1", "p2"]);
    }

    #[test]
    fn facets_are_sorted_and_distinct() {
        let index = index();
        assert_eq!(index.categories(), ["Rotina", "Segurança"]);
        assert_eq!(index.profiles(), ["Condutor", "Enfermagem", "Todos"]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn expand_matches_folded_keys() {
        let synonyms = Synonyms::default();
        let expanded = synonyms.expand("Passagem de Plantão noturno");
        assert_eq!(expanded[0], "Passagem de Plantão noturno");
        assert!(expanded.contains(&"passagem de turno".to_string()));
        assert_eq!(synonyms.expand("nada"), vec!["nada".to_string()]);
    }

    #[test]
    fn threshold_is_validated() {
        let err = PolicyIndex::from_json("[]", 1.5).unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
        let err = PolicyIndex::from_json("{", 0.3).unwrap_err();
        assert!(matches!(err, SearchError::Document(_)));
    }
}
