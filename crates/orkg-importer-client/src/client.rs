//! ORKG implementation of the graph service

use async_trait::async_trait;
use reqwest::header::{ACCEPT, LOCATION};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;

use orkg_importer_core::graph::{
    CreatedResource, CreatedStatement, GraphService, TemplateArgs, TemplateFunction,
    TemplateInstance,
};
use orkg_importer_core::{Error, Result};

use crate::auth::fetch_token;
use crate::config::OrkgConfig;
use crate::template::{DEFAULT_DATATYPE, LABEL_PARAM, TemplateDefinition};

const TEMPLATE_MEDIA_TYPE: &str = "application/vnd.orkg.template.v1+json;charset=UTF-8";

/// Authenticated client for one ORKG instance
pub struct OrkgClient {
    config: OrkgConfig,
    http: reqwest::Client,
    token: Option<String>,
    /// Materialized templates keyed by function name
    templates: HashMap<String, TemplateDefinition>,
}

impl OrkgClient {
    /// Create a client without logging in; only read requests will succeed
    pub fn new(config: OrkgConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(transport_error("build_client"))?;

        Ok(Self {
            config,
            http,
            token: None,
            templates: HashMap::new(),
        })
    }

    /// Create a client and log in with the configured credentials.
    ///
    /// Fails with [`Error::Configuration`] when no credentials are set.
    pub async fn connect(config: &OrkgConfig) -> Result<Self> {
        config.require_credentials()?;
        let mut client = Self::new(config.clone())?;
        client.token = Some(fetch_token(&client.http, &client.config).await?);
        Ok(client)
    }

    /// Fetch a template definition without materializing it
    pub async fn fetch_template(&self, template_id: &str) -> Result<TemplateDefinition> {
        let url = self
            .config
            .api_url(&format!("/api/templates/{}", template_id));
        tracing::debug!(url = %url, "Fetching template");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, TEMPLATE_MEDIA_TYPE)
            .send()
            .await
            .map_err(transport_error("materialize_template"))?;

        check_status("materialize_template", response)
            .await?
            .json()
            .await
            .map_err(transport_error("materialize_template"))
    }

    async fn post(&self, operation: &str, path: &str, body: &Value) -> Result<String> {
        let mut request = self
            .http
            .post(self.config.api_url(path))
            .header(ACCEPT, "application/json")
            .json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error(operation))?;
        let response = check_status(operation, response).await?;
        created_id(operation, response).await
    }

    async fn create_literal(&self, label: &str, datatype: &str) -> Result<String> {
        self.post(
            "create_literal",
            "/api/literals/",
            &json!({ "label": label, "datatype": datatype }),
        )
        .await
    }
}

#[async_trait]
impl GraphService for OrkgClient {
    async fn materialize_template(&mut self, template_id: &str) -> Result<()> {
        let template = self.fetch_template(template_id).await?;
        let name = template.function_name();
        tracing::info!(
            template_id,
            function = %name,
            properties = template.properties.len(),
            "Materialized template"
        );
        self.templates.insert(name, template);
        Ok(())
    }

    fn template_function(&self, name: &str) -> Option<TemplateFunction> {
        self.templates.get(name).map(|t| TemplateFunction {
            name: name.to_string(),
            template_id: t.id.clone(),
        })
    }

    async fn instantiate(
        &self,
        function: &TemplateFunction,
        args: TemplateArgs,
    ) -> Result<TemplateInstance> {
        let template = self.templates.get(&function.name).ok_or_else(|| {
            Error::external(
                "instantiate",
                format!("template function '{}' is not materialized", function.name),
            )
        })?;

        if let Some(unknown) = args.keys().find(|k| !template.accepts(k.as_str())) {
            return Err(Error::external(
                "instantiate",
                format!("{}() got an unexpected argument '{}'", function.name, unknown),
            ));
        }

        Ok(TemplateInstance {
            function: function.clone(),
            args,
        })
    }

    async fn persist(&mut self, instance: TemplateInstance) -> Result<CreatedResource> {
        let name = &instance.function.name;
        let template = self.templates.get(name).cloned().ok_or_else(|| {
            Error::external(
                "persist",
                format!("template function '{}' is not materialized", name),
            )
        })?;

        let label = instance.label().unwrap_or_default().to_string();
        let main = self
            .create_resource(&label, &[template.target_class.id.as_str()])
            .await?;

        for planned in plan_statements(&template, &instance.args) {
            let object_id = match planned.object {
                PlannedObject::Resource { label, class } => {
                    self.create_resource(&label, &[class]).await?.id
                }
                PlannedObject::Literal { label, datatype } => {
                    self.create_literal(&label, datatype).await?
                }
            };
            self.create_statement(&main.id, planned.predicate, &object_id)
                .await?;
        }

        tracing::debug!(id = %main.id, template = %template.id, "Persisted instance");
        Ok(main)
    }

    async fn create_resource(&mut self, label: &str, classes: &[&str]) -> Result<CreatedResource> {
        let id = self
            .post(
                "create_resource",
                "/api/resources/",
                &json!({ "label": label, "classes": classes }),
            )
            .await?;
        tracing::debug!(id = %id, label, "Created resource");

        Ok(CreatedResource {
            id,
            label: label.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        })
    }

    async fn create_statement(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<CreatedStatement> {
        let id = self
            .post(
                "create_statement",
                "/api/statements/",
                &json!({
                    "subject_id": subject,
                    "predicate_id": predicate,
                    "object_id": object,
                }),
            )
            .await?;
        tracing::debug!(id = %id, subject, predicate, object, "Created statement");

        Ok(CreatedStatement {
            id,
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
        })
    }
}

/// Object node to create for one template argument value
#[derive(Debug, Clone, PartialEq, Eq)]
enum PlannedObject<'a> {
    /// Resource of the property's range class
    Resource { label: String, class: &'a str },
    /// Typed literal
    Literal { label: String, datatype: &'a str },
}

/// Statement to attach to the instance resource
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedStatement<'a> {
    predicate: &'a str,
    object: PlannedObject<'a>,
}

/// Statements an instance expands into, in argument order.
///
/// `label` names the instance itself and arguments without a matching
/// property are ignored. Class-ranged properties get one resource per value;
/// everything else becomes a literal of the declared datatype.
fn plan_statements<'a>(
    template: &'a TemplateDefinition,
    args: &TemplateArgs,
) -> Vec<PlannedStatement<'a>> {
    let mut planned = Vec::new();
    for (parameter, value) in args {
        if parameter == LABEL_PARAM {
            continue;
        }
        let Some(property) = template.property(parameter) else {
            continue;
        };

        for item in expand(value) {
            let label = literal_text(item);
            let object = match &property.class {
                Some(class) => PlannedObject::Resource {
                    label,
                    class: class.id.as_str(),
                },
                None => PlannedObject::Literal {
                    label,
                    datatype: property
                        .datatype
                        .as_ref()
                        .map(|d| d.id.as_str())
                        .unwrap_or(DEFAULT_DATATYPE),
                },
            };
            planned.push(PlannedStatement {
                predicate: property.path.id.as_str(),
                object,
            });
        }
    }
    planned
}

/// Map a transport failure to a graph service error for `operation`
pub(crate) fn transport_error(operation: &str) -> impl Fn(reqwest::Error) -> Error + '_ {
    move |err| Error::external(operation, err)
}

/// Turn non-2xx responses into graph service errors carrying the body
pub(crate) async fn check_status(
    operation: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::external(operation, format!("{}: {}", status, body)))
}

/// Id of a created entity: JSON body `id`, else the `Location` header
async fn created_id(operation: &str, response: reqwest::Response) -> Result<String> {
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response
        .text()
        .await
        .map_err(transport_error(operation))?;

    id_from_response(&body, location.as_deref()).ok_or_else(|| {
        Error::external(operation, "response carried neither an id nor a Location header")
    })
}

fn id_from_response(body: &str, location: Option<&str>) -> Option<String> {
    let from_body = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("id").and_then(Value::as_str).map(str::to_string));

    from_body.or_else(|| {
        location
            .map(|l| l.trim_end_matches('/'))
            .and_then(|l| l.rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    })
}

/// Arrays become one value per element; nulls are dropped
fn expand(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().filter(|v| !v.is_null()).collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
