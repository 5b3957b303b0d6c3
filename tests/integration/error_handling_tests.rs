//! Error handling tests

#[cfg(test)]
mod tests {
    use litellm_router::core::router::{DeploymentRegistry, Router, RouterConfig, RouterError};
    use litellm_router::{Config, GatewayError};

    #[test]
    fn test_router_error_messages() {
        assert_eq!(
            RouterError::EmptyPool("claude-sonnet".to_string()).to_string(),
            "No available deployment for model: claude-sonnet"
        );
        assert!(
            RouterError::RetriesExhausted {
                model: "claude-sonnet".to_string(),
                attempts: 3,
            }
            .to_string()
            .contains("3")
        );
    }

    #[test]
    fn test_router_error_into_gateway_error() {
        fn route(router: &Router) -> litellm_router::Result<String> {
            Ok(router.route("missing")?.id)
        }

        let router = Router::with_registry(DeploymentRegistry::new(), RouterConfig::default());
        let err = route(&router).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Router(RouterError::ModelNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let err = Config::from_file("/nonexistent/router.yaml").await.unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Config::from_yaml_str("model_list: [unclosed").unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }
}
