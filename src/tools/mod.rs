//! MCP tools implementation
//!
//! Every tool is declared once, as a typed argument struct plus the client
//! call it performs. The catalog shown to hosts and the dispatch table are
//! built from the same entries.

pub mod comments;
pub mod conversations;
pub mod insights;
pub mod pages;
pub mod photos;
pub mod posts;
pub mod videos;

use crate::error::AppError;
use crate::facebook::FacebookClient;
use futures::future::BoxFuture;
use futures::{FutureExt, TryFutureExt};
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;

/// Tool grouping, mirrored in the server-info resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pages,
    Posts,
    Comments,
    Photos,
    Videos,
    Insights,
    Conversations,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Pages,
        Category::Posts,
        Category::Comments,
        Category::Photos,
        Category::Videos,
        Category::Insights,
        Category::Conversations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pages => "pages",
            Category::Posts => "posts",
            Category::Comments => "comments",
            Category::Photos => "photos",
            Category::Videos => "videos",
            Category::Insights => "insights",
            Category::Conversations => "conversations",
        }
    }
}

/// Behavioral hints for hosts. Not interpreted by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub title: &'static str,
    pub read_only_hint: bool,
    pub destructive_hint: bool,
    pub idempotent_hint: bool,
    pub open_world_hint: bool,
}

impl ToolAnnotations {
    pub fn read_only(title: &'static str) -> Self {
        Self {
            title,
            read_only_hint: true,
            destructive_hint: false,
            idempotent_hint: true,
            open_world_hint: true,
        }
    }

    pub fn write(title: &'static str) -> Self {
        Self {
            title,
            read_only_hint: false,
            destructive_hint: false,
            idempotent_hint: false,
            open_world_hint: true,
        }
    }

    pub fn idempotent_write(title: &'static str) -> Self {
        Self {
            idempotent_hint: true,
            ..Self::write(title)
        }
    }

    pub fn destructive(title: &'static str) -> Self {
        Self {
            title,
            read_only_hint: false,
            destructive_hint: true,
            idempotent_hint: true,
            open_world_hint: true,
        }
    }
}

/// What `tools/list` reports for one tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub annotations: ToolAnnotations,
    #[serde(skip)]
    pub category: Category,
}

type Handler =
    Box<dyn Fn(FacebookClient, Value) -> BoxFuture<'static, Result<Value, AppError>> + Send + Sync>;

/// A catalog entry: descriptor plus the single client call it maps to
pub struct Tool {
    pub descriptor: ToolDescriptor,
    handler: Handler,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Decode `args` into the tool's argument struct and perform its call
    pub async fn invoke(&self, client: FacebookClient, args: Value) -> Result<Value, AppError> {
        (self.handler)(client, args).await
    }
}

/// Declare a tool whose arguments deserialize into `A`
pub(crate) fn tool<A, F, Fut>(
    name: &'static str,
    category: Category,
    description: &'static str,
    annotations: ToolAnnotations,
    op: F,
) -> Tool
where
    A: DeserializeOwned + JsonSchema + Send + 'static,
    F: Fn(FacebookClient, A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, AppError>> + Send + 'static,
{
    let handler: Handler = Box::new(move |client, args| match parse_args::<A>(name, args) {
        Ok(parsed) => op(client, parsed)
            .map_err(move |e| e.for_tool(name))
            .boxed(),
        Err(e) => futures::future::ready(Err(e)).boxed(),
    });

    Tool {
        descriptor: ToolDescriptor {
            name,
            description,
            input_schema: input_schema::<A>(),
            annotations,
            category,
        },
        handler,
    }
}

/// Structural decoding only; the Graph API judges the values themselves
pub(crate) fn parse_args<A: DeserializeOwned>(tool: &str, args: Value) -> Result<A, AppError> {
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        Value::Object(map) => Value::Object(map),
        other => {
            return Err(AppError::validation(
                tool,
                format!("arguments must be a JSON object, got {}", json_type(&other)),
            ))
        }
    };
    serde_json::from_value(args).map_err(|e| AppError::validation(tool, e.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Inline JSON schema for an argument struct, always with a `properties` object
pub(crate) fn input_schema<A: JsonSchema>() -> Value {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.meta_schema = None;
    });
    let root = settings.into_generator().into_root_schema_for::<A>();
    let mut schema = serde_json::to_value(root).unwrap_or_else(|_| Value::Object(Map::new()));
    if let Value::Object(map) = &mut schema {
        map.remove("title");
        map.entry("type").or_insert_with(|| Value::String("object".to_string()));
        map.entry("properties").or_insert_with(|| Value::Object(Map::new()));
    }
    schema
}

/// Ordered tool catalog doubling as the dispatch table
pub struct Catalog {
    tools: Vec<Tool>,
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        let mut tools = Vec::new();
        tools.extend(pages::tools());
        tools.extend(posts::tools());
        tools.extend(comments::tools());
        tools.extend(photos::tools());
        tools.extend(videos::tools());
        tools.extend(insights::tools());
        tools.extend(conversations::tools());
        Self::from_tools(tools)
    }

    pub(crate) fn from_tools(tools: Vec<Tool>) -> Self {
        let mut index = HashMap::with_capacity(tools.len());
        for (i, tool) in tools.iter().enumerate() {
            let previous = index.insert(tool.name(), i);
            debug_assert!(previous.is_none(), "duplicate tool name {}", tool.name());
        }
        Self { tools, index }
    }

    pub fn get(&self, name: &str) -> Result<&Tool, AppError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| AppError::UnknownTool(name.to_string()))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.descriptors().filter(|d| d.category == category).count()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
