//! # Prompt Templates
//!
//! The fixed instructional templates for the flows, plus the placeholder
//! substitution helper. Flow inputs are embedded verbatim into the
//! `{placeholder}` slots; the templates themselves are not configurable at
//! runtime.

// --- SQL Generation ---

pub const SQL_GENERATION_SYSTEM_PROMPT: &str = "You are an expert SQL query generator. Given the database schema and a natural language question, you will generate the corresponding SQL query to answer the question. Respond ONLY with a valid JSON object containing a single key, `sqlQuery`, whose value is the generated SQL query. Do not include any other text or explanations.";

pub const SQL_GENERATION_USER_PROMPT: &str = r#"Database Schema:
{schemaDefinition}

Natural Language Question:
{naturalLanguageQuestion}

SQL Query:"#;

// --- Mock Data Generation ---

pub const MOCK_DATA_SYSTEM_PROMPT: &str = "You are an expert data generator. Given the database schema and a SQL query, you will generate a realistic set of mock data that would be the result of running that query. Respond ONLY with a valid JSON object containing a single key, `mockData`, whose value is a JSON-encoded array of objects. The structure of the objects must match the columns returned by the SQL query. Do not include any other text or explanations.";

pub const MOCK_DATA_USER_PROMPT: &str = r#"Database Schema:
{schemaDefinition}

SQL Query:
{sqlQuery}

Return between 3 and 7 rows of mock data.

JSON Mock Data:"#;

/// Substitutes `{key}` placeholders in a template with the given values.
///
/// Unknown placeholders are left intact, so a missing variable is visible in
/// the rendered prompt rather than silently dropped.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in vars {
        rendered = rendered.replace(&format!("{{{key}}}"), value);
    }
    rendered
}
