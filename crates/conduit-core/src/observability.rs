//! Serializable views of a catalog, for status endpoints and CLIs.

use serde::Serialize;

use crate::catalog::{FunctionCatalog, FunctionInspectorExt};
use crate::domain::{Arity, TypeRef};

#[derive(Debug, Clone, Serialize)]
pub struct FunctionSummary {
    pub names: Vec<String>,
    pub arity: Arity,
    pub input_type: TypeRef,
    pub output_type: TypeRef,
    pub is_message: bool,
    pub routing: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogSummary {
    pub functions: Vec<FunctionSummary>,
}

impl CatalogSummary {
    pub fn of(catalog: &FunctionCatalog) -> Self {
        let functions = catalog
            .registrations()
            .map(|registration| {
                let handle = registration.handle();
                FunctionSummary {
                    names: registration.names().iter().cloned().collect(),
                    arity: registration.descriptor().arity(),
                    input_type: catalog.input_type(handle),
                    output_type: catalog.output_type(handle),
                    is_message: catalog.is_message(handle),
                    routing: handle.is_routing(),
                }
            })
            .collect();
        Self { functions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CatalogBuilder;
    use crate::catalog::{FunctionRegistration, RoutingFunction};
    use crate::impls::DirectDispatch;
    use serde_json::json;

    #[test]
    fn summary_serializes_type_names() {
        let catalog = CatalogBuilder::new()
            .register(FunctionRegistration::function(|s: String| s.len()).with_name("len"))
            .unwrap()
            .register(FunctionRegistration::routing(RoutingFunction::new(
                DirectDispatch::new("len"),
            )))
            .unwrap()
            .build()
            .unwrap();

        let value = serde_json::to_value(CatalogSummary::of(&catalog)).unwrap();
        let functions = value["functions"].as_array().unwrap();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0]["names"], json!(["len"]));
        assert_eq!(functions[0]["is_message"], json!(false));
        assert_eq!(functions[1]["routing"], json!(true));
        assert_eq!(functions[1]["is_message"], json!(true));
    }
}
