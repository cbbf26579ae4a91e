use serde::Serialize;
use wordindex::{
    BuildReport, Document, EngineConfig, IndexStats, SearchOutcome, SearchResultRow,
    TermFrequency,
};

use crate::Result;

clap::arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum OutputFormat {
        Text,
        Json
    }
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    document_count: usize,
    #[serde(flatten)]
    outcome: &'a SearchOutcome,
}

#[derive(Serialize)]
struct TopTermsResponse<'a> {
    term_count: usize,
    terms: &'a [TermFrequency],
}

#[derive(Serialize)]
struct DocumentsResponse<'a> {
    document_count: usize,
    documents: Vec<&'a Document>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Formats engine results for display, as aligned text or as JSON documents.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Renderer {
        Renderer { format }
    }

    /// `query` is how the user phrased the lookup, e.g. `search` or `search AND index`.
    pub fn search(&self, query: &str, outcome: &SearchOutcome) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(&SearchResponse {
                query,
                document_count: outcome.rows().len(),
                outcome,
            });
        }

        let mut out = String::new();
        match outcome {
            SearchOutcome::NotIndexed { terms } => {
                let quoted: Vec<String> = terms.iter().map(|t| format!("\"{}\"", t)).collect();
                let verb = if terms.len() == 1 { "is" } else { "are" };
                out.push_str(&format!(
                    "No results: {} {} not indexed.",
                    quoted.join(", "),
                    verb
                ));
            }
            SearchOutcome::Matches { rows } if rows.is_empty() => {
                out.push_str(&format!("No documents match \"{}\".", query));
            }
            SearchOutcome::Matches { rows } => {
                out.push_str(&format!(
                    "Results for \"{}\" ({} document{}):\n",
                    query,
                    rows.len(),
                    plural(rows.len())
                ));
                Self::rows(&mut out, rows);
            }
        }
        Ok(out.trim_end().to_string())
    }

    pub fn top_terms(&self, terms: &[TermFrequency]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(&TopTermsResponse {
                term_count: terms.len(),
                terms,
            });
        }
        if terms.is_empty() {
            return Ok("No terms indexed.".to_string());
        }

        let width = terms.iter().map(|t| t.term.len()).max().unwrap_or(0);
        let mut out = format!("Top {} term{}:\n", terms.len(), plural(terms.len()));
        for entry in terms {
            out.push_str(&format!(
                "  {:>3}. {:<width$}  {} occurrence{} in {} document{}\n",
                entry.rank,
                entry.term,
                entry.frequency,
                plural(entry.frequency as usize),
                entry.documents,
                plural(entry.documents),
                width = width
            ));
        }
        Ok(out.trim_end().to_string())
    }

    pub fn stats(&self, stats: &IndexStats) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(stats);
        }
        let lines = [
            ("Documents indexed", stats.document_count.to_string()),
            ("Unique terms", stats.unique_terms.to_string()),
            ("Total postings", stats.total_postings.to_string()),
            ("Total occurrences", stats.total_occurrences.to_string()),
            ("Buckets", stats.bucket_count.to_string()),
            ("Used buckets", stats.used_buckets.to_string()),
            ("Load factor", format!("{:.4}", stats.load_factor)),
            ("Longest chain", stats.longest_chain.to_string()),
            ("Average chain", format!("{:.2}", stats.average_chain)),
        ];
        Ok(Self::table("Index statistics:", &lines))
    }

    pub fn documents<'a, I>(&self, documents: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let documents: Vec<&Document> = documents.into_iter().collect();
        if self.format == OutputFormat::Json {
            return Self::json(&DocumentsResponse {
                document_count: documents.len(),
                documents,
            });
        }
        if documents.is_empty() {
            return Ok("No documents registered.".to_string());
        }

        let mut out = format!("{} document{}:\n", documents.len(), plural(documents.len()));
        for doc in documents {
            out.push_str(&format!(
                "  [{:>3}] {}  ({} term{})\n",
                doc.id,
                doc.name,
                doc.indexed_terms,
                plural(doc.indexed_terms)
            ));
        }
        Ok(out.trim_end().to_string())
    }

    pub fn build_report(&self, report: &BuildReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(report);
        }
        let mut out = format!(
            "Indexed {} document{} ({} term{}).",
            report.documents_indexed,
            plural(report.documents_indexed),
            report.terms_indexed,
            plural(report.terms_indexed)
        );
        for failure in &report.failures {
            out.push_str(&format!("\n  failed: {}", failure.reason));
        }
        if !report.refused.is_empty() {
            out.push_str(&format!(
                "\n  document limit reached, not indexed: {}",
                report.refused.join(", ")
            ));
        }
        Ok(out)
    }

    pub fn config(&self, config: &EngineConfig) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(config);
        }
        let lines = [
            ("Max documents", config.max_documents.to_string()),
            ("Buckets", config.bucket_count.to_string()),
            ("Default top K", config.top_terms.to_string()),
            ("Max term length", config.max_term_len.to_string()),
            ("Max name length", config.max_name_len.to_string()),
        ];
        Ok(Self::table("Configuration:", &lines))
    }

    pub fn message(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({ "message": message }).to_string(),
            OutputFormat::Text => message.to_string(),
        }
    }

    /// Errors are always rendered; a JSON encoding failure falls back to text.
    pub fn error(&self, error: &dyn std::error::Error) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string(&ErrorResponse {
                error: error.to_string(),
            })
            .unwrap_or_else(|_| format!("error: {}", error)),
            OutputFormat::Text => format!("error: {}", error),
        }
    }

    fn rows(out: &mut String, rows: &[SearchResultRow]) {
        let width = rows.iter().map(|r| r.document.len()).max().unwrap_or(0);
        for row in rows {
            out.push_str(&format!(
                "  {:>3}. {:<width$}  frequency {}\n",
                row.rank,
                row.document,
                row.frequency,
                width = width
            ));
        }
    }

    fn table(title: &str, lines: &[(&str, String)]) -> String {
        let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let mut out = format!("{}\n", title);
        for (label, value) in lines {
            out.push_str(&format!("  {:<width$}  {}\n", label, value, width = width));
        }
        out.trim_end().to_string()
    }

    fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
