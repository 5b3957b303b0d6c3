//! Configuration loading and validation tests

#[cfg(test)]
mod tests {
    use crate::common::ConfigFixture;
    use litellm_router::core::router::ProviderFamily;
    use litellm_router::{Config, GatewayError};

    #[tokio::test]
    async fn test_load_config_file() {
        let file = ConfigFixture::write(ConfigFixture::CLAUDE_POOL);
        let config = crate::assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.model_list.len(), 4);
        assert_eq!(config.router_settings.forced_cooldown_time, 120);

        let deployments = config.deployments();
        let ids: Vec<&str> = deployments.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["anthropic-primary", "anthropic-backup", "vertex-claude", "gpt-4o-3"]
        );
        assert_eq!(deployments[2].provider, ProviderFamily::VertexAI);
        assert_eq!(deployments[3].params.rpm(), 600.0);
        assert_eq!(deployments[3].params.tpm(), 90000.0);
    }

    #[test]
    fn test_lenient_metrics() {
        let config = Config::from_yaml_str(
            r#"
model_list:
  - model_name: claude-sonnet
    litellm_params:
      model: anthropic/claude-sonnet-4
      weight: -3
      rpm: lots
      tpm: .nan
"#,
        )
        .unwrap();

        let deployment = &config.deployments()[0];
        assert_eq!(deployment.params.weight(), 0.0);
        assert_eq!(deployment.params.rpm(), 0.0);
        assert_eq!(deployment.params.tpm(), 0.0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = crate::assert_err!(Config::from_yaml_str(
            r#"
model_list:
  - model_name: claude-sonnet
    litellm_params:
      model: anthropic/claude-sonnet-4
    model_info:
      id: primary
  - model_name: claude-haiku
    litellm_params:
      model: anthropic/claude-haiku-4
    model_info:
      id: primary
"#,
        ));

        assert!(matches!(err, GatewayError::Validation(_)));
        assert!(err.to_string().contains("Duplicate deployment id: primary"));
    }

    #[test]
    fn test_custom_classifier_rules() {
        let config = Config::from_yaml_str(
            r#"
model_list:
  - model_name: deepseek-chat
    litellm_params:
      model: deepseek/deepseek-chat
failure_classifier:
  balance_exhaustion_rules:
    - provider: deepseek
      message_contains: Insufficient Balance
    - provider: anthropic
      pattern: "credit balance is (too )?low"
"#,
        )
        .unwrap();

        let classifier = config.classifier().unwrap();
        assert_eq!(classifier.rules().len(), 2);
        assert_eq!(classifier.rules()[0].provider(), &ProviderFamily::DeepSeek);
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let err = Config::from_yaml_str(
            r#"
failure_classifier:
  balance_exhaustion_rules:
    - provider: anthropic
      message_contains: ""
"#,
        )
        .unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));

        let err = Config::from_yaml_str(
            r#"
router_settings:
  allowed_fails: 0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("allowed_fails"));
    }

    #[tokio::test]
    async fn test_round_trip_through_yaml() {
        let config = Config::from_yaml_str(ConfigFixture::CLAUDE_POOL).unwrap();
        let file = ConfigFixture::write(&config.to_yaml().unwrap());

        let reloaded = Config::from_file(file.path()).await.unwrap();
        assert_eq!(reloaded.deployments(), config.deployments());
        assert_eq!(reloaded.router_settings, config.router_settings);
    }
}
