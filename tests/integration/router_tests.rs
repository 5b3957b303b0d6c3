//! Router integration tests
//!
//! Selection, failure classification and cooldown wired through a router
//! built from configuration.

#[cfg(test)]
mod tests {
    use crate::common::assertions::FailureSignalAssertions;
    use crate::common::{ConfigFixture, DeploymentFactory};
    use litellm_router::core::router::{
        CooldownRegistry, CooldownSink, DeploymentRegistry, FailureClassifier,
        FailureDescriptor, RequestOutcome, Router, RouterConfig, RouterError, SelectionTier,
        UpstreamError, UpstreamErrorKind, select, select_with_tier,
    };
    use litellm_router::Config;
    use std::sync::Arc;
    use std::time::Duration;

    fn claude_router() -> (Router, Arc<CooldownRegistry>) {
        let config = Config::from_yaml_str(ConfigFixture::CLAUDE_POOL).unwrap();
        let router_config = config.router_config();
        let cooldown = Arc::new(CooldownRegistry::new(&router_config));
        let router = Router::new(
            DeploymentRegistry::from_config(&config),
            cooldown.clone(),
            config.classifier().unwrap(),
            router_config,
        );
        (router, cooldown)
    }

    /// Weight decides before rpm and tpm
    #[test]
    fn test_select_by_weight() {
        let pool = vec![
            DeploymentFactory::with_limits("A", 1000.0, 1_000_000.0),
            DeploymentFactory::anthropic("B", 1.0),
        ];

        let selection = select_with_tier(&pool, "claude-sonnet").unwrap();
        assert_eq!(selection.deployment.id, "B");
        assert_eq!(selection.tier, SelectionTier::Weight);
    }

    /// Equal maxima keep the first deployment in order
    #[test]
    fn test_select_tie_keeps_order() {
        let pool = vec![
            DeploymentFactory::anthropic("A", 2.0),
            DeploymentFactory::vertex("B", 2.0),
        ];

        assert_eq!(select(&pool, "claude-sonnet").unwrap().id, "A");
    }

    #[test]
    fn test_select_empty_pool() {
        let err = select(&[], "claude-sonnet").unwrap_err();
        assert_eq!(err, RouterError::EmptyPool("claude-sonnet".to_string()));
    }

    #[test]
    fn test_router_from_config() {
        let config = Config::from_yaml_str(ConfigFixture::CLAUDE_POOL).unwrap();
        let router = Router::from_config(&config).unwrap();

        assert_eq!(router.config().forced_cooldown_secs, 120);
        assert_eq!(router.route("claude").unwrap().id, "anthropic-primary");

        let (deployment, tier) = router.route_with_tier("gpt-4o").unwrap();
        assert_eq!(deployment.id, "gpt-4o-3");
        assert_eq!(tier, SelectionTier::Rpm);
    }

    /// Fractional limits from the config file are compared as written
    #[test]
    fn test_fractional_limits_from_config() {
        let config = Config::from_yaml_str(
            r#"
model_list:
  - model_name: small
    litellm_params:
      model: openai/gpt-4o-mini
      rpm: 1.2
    model_info:
      id: A
  - model_name: small
    litellm_params:
      model: openai/gpt-4o-mini
      rpm: 1.9
    model_info:
      id: B
  - model_name: tiny
    litellm_params:
      model: openai/gpt-4o-mini
    model_info:
      id: C
  - model_name: tiny
    litellm_params:
      model: openai/gpt-4o-mini
      tpm: 0.5
    model_info:
      id: D
"#,
        )
        .unwrap();
        let router = Router::from_config(&config).unwrap();

        let (deployment, tier) = router.route_with_tier("small").unwrap();
        assert_eq!(deployment.id, "B");
        assert_eq!(tier, SelectionTier::Rpm);

        let (deployment, tier) = router.route_with_tier("tiny").unwrap();
        assert_eq!(deployment.id, "D");
        assert_eq!(tier, SelectionTier::Tpm);
    }

    /// Balance exhaustion on the primary account moves traffic to the backup
    #[test]
    fn test_balance_exhaustion_fails_over() {
        let (router, cooldown) = claude_router();

        let signal = router.report(RequestOutcome::failure(
            FailureDescriptor::new("anthropic-primary", UpstreamErrorKind::BadRequest)
                .with_status(400)
                .with_message(
                    "Your credit balance is too low to access the Anthropic API. \
                     Please go to Plans & Billing to upgrade or purchase credits.",
                ),
        ));

        signal.assert_forced_cooldown_for("anthropic-primary");
        assert!(cooldown.is_in_cooldown("anthropic-primary"));
        let remaining = cooldown.cooldown_remaining("anthropic-primary").unwrap();
        assert!(remaining > Duration::from_secs(110));

        assert_eq!(router.route("claude-sonnet").unwrap().id, "anthropic-backup");
    }

    /// Client errors leave the deployment in rotation
    #[test]
    fn test_client_error_does_not_fail_over() {
        let (router, cooldown) = claude_router();

        let signal = router.report(RequestOutcome::failure(
            FailureDescriptor::new("anthropic-primary", UpstreamErrorKind::BadRequest)
                .with_status(400)
                .with_message("messages: text content blocks must be non-empty"),
        ));

        signal.assert_no_escalation();
        assert!(!cooldown.is_in_cooldown("anthropic-primary"));
        assert_eq!(router.route("claude-sonnet").unwrap().id, "anthropic-primary");
    }

    /// The same message from a provider without a rule is an ordinary failure
    #[test]
    fn test_other_provider_is_not_escalated() {
        let (router, _cooldown) = claude_router();

        let signal = router.report(RequestOutcome::failure(
            FailureDescriptor::new("vertex-claude", UpstreamErrorKind::BadRequest)
                .with_message("balance is too low"),
        ));

        signal.assert_no_escalation();
    }

    #[test]
    fn test_upstream_retry_after_sets_cooldown() {
        let (router, cooldown) = claude_router();

        router.report(RequestOutcome::failure(
            FailureDescriptor::new("anthropic-backup", UpstreamErrorKind::BadRequest)
                .with_message("balance is too low")
                .with_retry_after(Duration::from_secs(900)),
        ));

        let remaining = cooldown.cooldown_remaining("anthropic-backup").unwrap();
        assert!(remaining > Duration::from_secs(890));
    }

    #[tokio::test]
    async fn test_execute_fails_over_to_backup() {
        let (router, cooldown) = claude_router();

        let result = router
            .execute("claude", |deployment| async move {
                match deployment.id.as_str() {
                    "anthropic-primary" => Err(UpstreamError::from_status(
                        400,
                        "Your credit balance is too low to access the Anthropic API",
                    )),
                    _ => Ok(format!("hello from {}", deployment.id)),
                }
            })
            .await
            .unwrap();

        assert_eq!(result.deployment_id, "anthropic-backup");
        assert_eq!(result.attempts, 2);
        assert_eq!(result.result, "hello from anthropic-backup");
        assert_eq!(cooldown.request_counts("anthropic-backup"), (1, 0));
    }

    #[tokio::test]
    async fn test_execute_rate_limits_exhaust_retries() {
        let registry = DeploymentRegistry::with_deployments(vec![DeploymentFactory::anthropic(
            "only", 1.0,
        )]);
        let config = RouterConfig {
            num_retries: 1,
            allowed_fails: 10,
            ..Default::default()
        };
        let router = Router::new(
            registry,
            Arc::new(CooldownRegistry::new(&config)),
            FailureClassifier::default(),
            config,
        );

        let err = router
            .execute("claude-sonnet", |_deployment| async {
                Err::<(), _>(UpstreamError::from_status(429, "rate limited"))
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RouterError::RetriesExhausted {
                model: "claude-sonnet".to_string(),
                attempts: 2,
            }
        );
    }
}
