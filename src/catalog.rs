//! Endpoint catalog - the static registry of launchpad API operations
//! available for interactive testing. Built once at startup, read-only
//! thereafter.

use crate::models::HttpMethod;

/// Where a path parameter's default value comes from when the field is
/// seeded for the first time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultSource {
    FirstChainId,
    FirstTemplateId,
}

#[derive(Clone, Debug)]
pub struct PathParam {
    pub name: &'static str,
    pub default: Option<DefaultSource>,
}

#[derive(Clone, Debug)]
pub struct QueryParam {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// One callable API operation. Pure data, no behavior.
#[derive(Clone, Debug)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path_template: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub path_params: Vec<PathParam>,
    pub query_params: Vec<QueryParam>,
    pub example_body: Option<&'static str>,
}

impl Endpoint {
    pub fn has_body(&self) -> bool {
        self.example_body.is_some()
    }
}

fn path(name: &'static str) -> PathParam {
    PathParam {
        name,
        default: None,
    }
}

fn path_with_default(name: &'static str, default: DefaultSource) -> PathParam {
    PathParam {
        name,
        default: Some(default),
    }
}

fn query(name: &'static str, description: &'static str, required: bool) -> QueryParam {
    QueryParam {
        name,
        description,
        required,
    }
}

/// Build the full endpoint catalog in display order.
pub fn build_catalog() -> Vec<Endpoint> {
    vec![
        Endpoint {
            name: "Get Chains",
            method: HttpMethod::GET,
            path_template: "/chains",
            category: "Chains",
            description: "List all launched chains",
            path_params: vec![],
            query_params: vec![
                query("limit", "Max rows to return", false),
                query("offset", "Rows to skip", false),
                query("status", "Filter by lifecycle status", false),
            ],
            example_body: None,
        },
        Endpoint {
            name: "Get Chain",
            method: HttpMethod::GET,
            path_template: "/chains/{id}",
            category: "Chains",
            description: "Fetch a single chain by id",
            path_params: vec![path_with_default("id", DefaultSource::FirstChainId)],
            query_params: vec![],
            example_body: None,
        },
        Endpoint {
            name: "Create Chain",
            method: HttpMethod::POST,
            path_template: "/chains",
            category: "Chains",
            description: "Launch a new chain from a template",
            path_params: vec![],
            query_params: vec![],
            example_body: Some(
                r#"{"name": "My Chain", "symbol": "MYC", "template_id": "tpl-1", "initial_supply": 1000000}"#,
            ),
        },
        Endpoint {
            name: "Update Chain",
            method: HttpMethod::PUT,
            path_template: "/chains/{id}",
            category: "Chains",
            description: "Update chain metadata",
            path_params: vec![path_with_default("id", DefaultSource::FirstChainId)],
            query_params: vec![],
            example_body: Some(r#"{"name": "Renamed Chain", "description": "Updated"}"#),
        },
        Endpoint {
            name: "Delete Chain",
            method: HttpMethod::DELETE,
            path_template: "/chains/{id}",
            category: "Chains",
            description: "Delete a chain",
            path_params: vec![path_with_default("id", DefaultSource::FirstChainId)],
            query_params: vec![],
            example_body: None,
        },
        Endpoint {
            name: "Get Chain Holders",
            method: HttpMethod::GET,
            path_template: "/chains/{id}/holders",
            category: "Chains",
            description: "List token holders of a chain",
            path_params: vec![path_with_default("id", DefaultSource::FirstChainId)],
            query_params: vec![query("limit", "Max rows to return", false)],
            example_body: None,
        },
        Endpoint {
            name: "Get Templates",
            method: HttpMethod::GET,
            path_template: "/templates",
            category: "Templates",
            description: "List available curve templates",
            path_params: vec![],
            query_params: vec![query("limit", "Max rows to return", false)],
            example_body: None,
        },
        Endpoint {
            name: "Get Template",
            method: HttpMethod::GET,
            path_template: "/templates/{id}",
            category: "Templates",
            description: "Fetch a single template by id",
            path_params: vec![path_with_default("id", DefaultSource::FirstTemplateId)],
            query_params: vec![],
            example_body: None,
        },
        Endpoint {
            name: "Create Template",
            method: HttpMethod::POST,
            path_template: "/templates",
            category: "Templates",
            description: "Register a new curve template",
            path_params: vec![],
            query_params: vec![],
            example_body: Some(
                r#"{"name": "Linear", "curve_type": "linear", "slope": 0.5, "base_price": 1.0}"#,
            ),
        },
        Endpoint {
            name: "Quote Buy",
            method: HttpMethod::GET,
            path_template: "/chains/{id}/quote",
            category: "Trading",
            description: "Quote a buy against the chain's curve",
            path_params: vec![path_with_default("id", DefaultSource::FirstChainId)],
            query_params: vec![
                query("amount", "Token amount to quote", true),
                query("side", "buy or sell", false),
            ],
            example_body: None,
        },
        Endpoint {
            name: "Buy Tokens",
            method: HttpMethod::POST,
            path_template: "/chains/{id}/buy",
            category: "Trading",
            description: "Execute a buy on the chain's curve",
            path_params: vec![path_with_default("id", DefaultSource::FirstChainId)],
            query_params: vec![],
            example_body: Some(r#"{"amount": 100, "max_cost": 250.0}"#),
        },
        Endpoint {
            name: "Sell Tokens",
            method: HttpMethod::POST,
            path_template: "/chains/{id}/sell",
            category: "Trading",
            description: "Execute a sell on the chain's curve",
            path_params: vec![path_with_default("id", DefaultSource::FirstChainId)],
            query_params: vec![],
            example_body: Some(r#"{"amount": 100, "min_proceeds": 90.0}"#),
        },
        Endpoint {
            name: "Health",
            method: HttpMethod::GET,
            path_template: "/health",
            category: "System",
            description: "Backend health probe",
            path_params: vec![],
            query_params: vec![],
            example_body: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_unique() {
        let catalog = build_catalog();
        let mut names: Vec<&str> = catalog.iter().map(|e| e.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_path_params_match_template() {
        for ep in build_catalog() {
            for p in &ep.path_params {
                assert!(
                    ep.path_template.contains(&format!("{{{}}}", p.name)),
                    "{} missing placeholder for {}",
                    ep.name,
                    p.name
                );
            }
        }
    }

    #[test]
    fn test_example_bodies_are_valid_json() {
        for ep in build_catalog() {
            if let Some(body) = ep.example_body {
                let parsed: serde_json::Value = serde_json::from_str(body).unwrap();
                assert!(parsed.is_object(), "{} example body not an object", ep.name);
            }
        }
    }
}
