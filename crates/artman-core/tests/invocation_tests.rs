//! End-to-end resolution tests against the IAM sample config

use artman_config::{GithubConfig, UserConfig};
use artman_core::{
    ArgValue, Error, GithubCredentials, PUBLISH_PIPELINE, RawFlags, Subcommand, build, keys,
};
use artman_test_utils::fixtures::{
    self, DISCOGAPIC_CONFIG, GAPIC_CONFIG, JAVA_DISCOGAPIC, JAVA_GRPC, PYTHON_GAPIC,
    RUBY_EXPERIMENTAL,
};
use rstest::rstest;

fn generate_flags(artifact: &str) -> RawFlags {
    let mut flags = RawFlags::new(Subcommand::Generate, artifact);
    flags.root_dir = Some(fixtures::fixtures_dir());
    flags.github_username = Some("test".into());
    flags.github_token = Some("testtoken".into());
    flags
}

fn publish_flags(artifact: &str, target: &str) -> RawFlags {
    let mut flags = generate_flags(artifact);
    flags.subcommand = Subcommand::Publish;
    flags.target = Some(target.into());
    flags
}

mod generate {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn basic_args() {
        let invocation = build(
            &generate_flags(PYTHON_GAPIC),
            &fixtures::artifact_config(),
            &fixtures::user_config_with_toolkit(),
        )
        .unwrap();
        let args = invocation.arguments();

        assert_eq!(invocation.pipeline_name(), "GapicClientPipeline");
        assert!(args.get_paths(keys::DESC_PROTO_PATH)[0].as_str().ends_with("/google/iam/v1"));
        assert!(args.get_paths(keys::GAPIC_API_YAML)[0].as_str().ends_with("/test_gapic.yaml"));
        assert_eq!(
            args.get(keys::TOOLKIT),
            Some(&ArgValue::Path("/toolkit".into()))
        );
        assert!(!args.contains_key(keys::GITHUB));
        assert_eq!(args.get_str(keys::LANGUAGE), Some("python"));
        assert_eq!(args.get_str(keys::PUBLISH), Some("noop"));
    }

    #[test]
    fn without_root_dir_resolves_against_current_dir() {
        let mut flags = RawFlags::new(Subcommand::Generate, PYTHON_GAPIC);
        flags.root_dir = None;

        let invocation = build(
            &flags,
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();
        let args = invocation.arguments();

        assert_eq!(invocation.pipeline_name(), "GapicClientPipeline");
        assert_eq!(args.get_str(keys::PUBLISH), Some("noop"));
        assert!(!args.contains_key(keys::GITHUB));
        assert_eq!(args.get_str(keys::LANGUAGE), Some("python"));

        let cwd = artman_fs::resolve_root(None).unwrap();
        let desc = args.get_paths(keys::DESC_PROTO_PATH)[0];
        assert_eq!(desc, &cwd.join("google/iam/v1"));
    }

    #[test]
    fn toolkit_is_absent_without_user_toolkit() {
        let invocation = build(
            &generate_flags(PYTHON_GAPIC),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();
        assert!(!invocation.arguments().contains_key(keys::TOOLKIT));
    }

    #[test]
    fn common_settings_flow_into_arguments() {
        let invocation = build(
            &generate_flags(PYTHON_GAPIC),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();
        let args = invocation.arguments();

        assert_eq!(args.get_str(keys::API_NAME), Some("iam"));
        assert_eq!(args.get_str(keys::API_VERSION), Some("v1"));
        assert_eq!(args.get_str(keys::ORGANIZATION_NAME), Some("google-cloud"));
        assert_eq!(args.get_str(keys::RELEASE_LEVEL), Some("ALPHA"));
        assert_eq!(args.get_str(keys::ARTIFACT_TYPE), Some("GAPIC"));
        assert_eq!(
            args.get(keys::PROTO_DEPS),
            Some(&ArgValue::Strings(vec!["google-common-protos".into()]))
        );
        assert!(args.get_paths(keys::OUTPUT_DIR)[0].as_str().ends_with("/artman-genfiles"));
    }

    #[test]
    fn local_flag_points_sources_at_local_checkout() {
        let mut flags = generate_flags(PYTHON_GAPIC);
        flags.local = true;

        let invocation =
            build(&flags, &fixtures::artifact_config(), &fixtures::user_config()).unwrap();
        let args = invocation.arguments();

        assert_eq!(
            args.get_paths(keys::DESC_PROTO_PATH)[0].as_str(),
            "/src/googleapis/google/iam/v1"
        );
        assert_eq!(
            args.get_paths(keys::SERVICE_YAML)[0].as_str(),
            "/src/googleapis/google/iam/v1/iam.yaml"
        );
        // output_dir stays under the root directory
        assert!(!args.get_paths(keys::OUTPUT_DIR)[0]
            .as_str()
            .starts_with("/src/googleapis"));
    }

    #[test]
    fn pass_through_parameters() {
        let invocation = build(
            &generate_flags(JAVA_GRPC),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();
        let args = invocation.arguments();

        assert_eq!(invocation.pipeline_name(), "GrpcClientPipeline");
        assert_eq!(args.get("enable_batch_generation"), Some(&ArgValue::Bool(true)));
        assert_eq!(args.get_str("package_version"), Some("0.1.0"));
        assert_eq!(args.get_str(keys::LANGUAGE), Some("java"));
    }

    #[test]
    fn artifact_level_override_is_used() {
        let invocation = build(
            &generate_flags(GAPIC_CONFIG),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();

        assert_eq!(invocation.pipeline_name(), "GapicConfigPipeline");
        assert!(invocation.arguments().get_paths(keys::GAPIC_API_YAML)[0]
            .as_str()
            .ends_with("/iam_gapic_config.yaml"));
    }
}

mod discovery {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn discovery_doc_resolves_against_root() {
        let invocation = build(
            &generate_flags(JAVA_DISCOGAPIC),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();
        let args = invocation.arguments();

        assert_eq!(invocation.pipeline_name(), "DiscoGapicClientPipeline");
        let doc = args.get_paths(keys::DISCOVERY_DOC);
        assert_eq!(doc.len(), 1);
        assert!(doc[0].is_absolute(), "{}", doc[0]);
        assert!(doc[0].as_str().ends_with("/discoveries/compute.v1.json"));
    }

    #[test]
    fn discovery_doc_follows_local_checkout() {
        let mut flags = generate_flags(JAVA_DISCOGAPIC);
        flags.local = true;

        let invocation =
            build(&flags, &fixtures::artifact_config(), &fixtures::user_config()).unwrap();

        assert_eq!(
            invocation.arguments().get(keys::DISCOVERY_DOC),
            Some(&ArgValue::Path(
                "/src/googleapis/discoveries/compute.v1.json".into()
            ))
        );
    }

    #[test]
    fn structured_parameters_pass_through() {
        let invocation = build(
            &generate_flags(JAVA_DISCOGAPIC),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();
        let args = invocation.arguments();

        let timeout: serde_yaml::Value = serde_yaml::from_str("1.5").unwrap();
        assert_eq!(args.get("timeout"), Some(&ArgValue::Structured(timeout)));

        let json = serde_json::to_value(&invocation).unwrap();
        assert_eq!(json["arguments"]["timeout"], 1.5);
        assert_eq!(json["arguments"]["retry"]["max_attempts"], 3);
    }

    #[test]
    fn missing_discovery_doc_is_configuration_error() {
        let err = build(
            &generate_flags(DISCOGAPIC_CONFIG),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Configuration { ref message } if message.contains("discovery_doc")
        ));
    }

    #[test]
    fn publish_does_not_need_discovery_doc() {
        let invocation = build(
            &publish_flags(DISCOGAPIC_CONFIG, "github"),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();
        assert_eq!(invocation.pipeline_name(), PUBLISH_PIPELINE);
    }
}

mod publish {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn github_credentials_from_flags() {
        let invocation = build(
            &publish_flags(PYTHON_GAPIC, "github"),
            &fixtures::artifact_config(),
            &fixtures::user_config_with_toolkit(),
        )
        .unwrap();
        let args = invocation.arguments();

        assert_eq!(invocation.pipeline_name(), PUBLISH_PIPELINE);
        assert_eq!(args.get_str(keys::PUBLISH), Some("github"));
        assert_eq!(
            args.get(keys::GITHUB),
            Some(&ArgValue::Github(GithubCredentials::new("test", "testtoken")))
        );
        assert_eq!(
            args.get_str(keys::GIT_REPO),
            Some("git@github.com:googleapis/api-client-staging.git")
        );
    }

    #[test]
    fn github_credentials_from_user_config() {
        let mut flags = publish_flags(PYTHON_GAPIC, "github");
        flags.github_username = None;
        flags.github_token = None;

        let invocation =
            build(&flags, &fixtures::artifact_config(), &fixtures::user_config()).unwrap();
        let github = invocation
            .arguments()
            .get(keys::GITHUB)
            .and_then(ArgValue::as_github)
            .unwrap();

        assert_eq!(github.username, "config-user");
        assert_eq!(github.token, "config-token");
    }

    #[test]
    fn github_without_any_credentials_fails() {
        let mut flags = publish_flags(PYTHON_GAPIC, "github");
        flags.github_username = None;
        flags.github_token = None;
        let user = UserConfig {
            github: GithubConfig::default(),
            ..fixtures::user_config()
        };

        let err = build(&flags, &fixtures::artifact_config(), &user).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
    }

    #[test]
    fn github_without_declared_target_has_no_git_repo() {
        let invocation = build(
            &publish_flags(JAVA_GRPC, "github"),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();
        assert!(!invocation.arguments().contains_key(keys::GIT_REPO));
        assert!(invocation.arguments().contains_key(keys::GITHUB));
    }

    #[test]
    fn local_target() {
        let invocation = build(
            &publish_flags(PYTHON_GAPIC, "local"),
            &fixtures::artifact_config(),
            &fixtures::user_config(),
        )
        .unwrap();
        let args = invocation.arguments();

        assert_eq!(args.get_str(keys::PUBLISH), Some("local"));
        assert!(!args.contains_key(keys::GITHUB));
        assert_eq!(
            args.get(keys::LOCAL_REPO_DIR),
            Some(&ArgValue::Path("/src/googleapis".into()))
        );
    }

    #[test]
    fn target_is_case_sensitive() {
        let err = build(
            &publish_flags(PYTHON_GAPIC, "GitHub"),
            &fixtures::artifact_config(),
            &fixtures::user_config(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedPublishTarget { ref target } if target == "GitHub"
        ));
    }

    #[test]
    fn unknown_target_fails() {
        let err = build(
            &publish_flags(PYTHON_GAPIC, "staging"),
            &fixtures::artifact_config(),
            &fixtures::user_config(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedPublishTarget { .. }));
    }
}

mod failures {
    use super::*;

    #[test]
    fn unknown_artifact_is_configuration_error() {
        let result = build(
            &generate_flags("go_gapic"),
            &fixtures::artifact_config(),
            &fixtures::user_config(),
        );

        match result {
            Err(Error::Configuration { message }) => {
                assert!(message.contains("go_gapic"));
                assert!(message.contains(PYTHON_GAPIC));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_artifact_fails_before_publish_checks() {
        // Missing credentials would also fail; the artifact lookup wins.
        let mut flags = publish_flags("go_gapic", "github");
        flags.github_username = None;
        flags.github_token = None;

        let err = build(&flags, &fixtures::artifact_config(), &UserConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[rstest]
    #[case(Subcommand::Generate)]
    #[case(Subcommand::Publish)]
    fn unsupported_pipeline_kind(#[case] subcommand: Subcommand) {
        let mut flags = publish_flags(RUBY_EXPERIMENTAL, "github");
        flags.subcommand = subcommand;

        let err = build(&flags, &fixtures::artifact_config(), &UserConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedPipeline { ref artifact, ref kind }
                if artifact == RUBY_EXPERIMENTAL && kind == "RUBY_MAGIC"
        ));
    }

    #[test]
    fn missing_required_setting_is_configuration_error() {
        let mut config = fixtures::artifact_config();
        config.common.gapic_yaml = None;

        let err = build(&generate_flags(PYTHON_GAPIC), &config, &UserConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { ref message } if message.contains("gapic_api_yaml")));
    }
}

mod properties {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case(generate_flags(PYTHON_GAPIC))]
    #[case(generate_flags(JAVA_GRPC))]
    #[case(publish_flags(PYTHON_GAPIC, "github"))]
    #[case(publish_flags(PYTHON_GAPIC, "local"))]
    fn github_key_iff_github_publish(#[case] flags: RawFlags) {
        let invocation =
            build(&flags, &fixtures::artifact_config(), &fixtures::user_config()).unwrap();
        let args = invocation.arguments();

        assert_eq!(
            args.contains_key(keys::GITHUB),
            args.get_str(keys::PUBLISH) == Some("github")
        );
    }

    #[rstest]
    #[case(generate_flags(PYTHON_GAPIC))]
    #[case(generate_flags(GAPIC_CONFIG))]
    #[case(generate_flags(JAVA_DISCOGAPIC))]
    #[case(publish_flags(PYTHON_GAPIC, "local"))]
    fn every_path_argument_is_absolute(#[case] flags: RawFlags) {
        let invocation =
            build(&flags, &fixtures::artifact_config(), &fixtures::user_config()).unwrap();

        for (key, value) in invocation.arguments() {
            for path in value.paths() {
                assert!(path.is_absolute(), "{key} is not absolute: {path}");
            }
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let flags = publish_flags(PYTHON_GAPIC, "github");
        let config = fixtures::artifact_config();
        let user = fixtures::user_config();

        let first = build(&flags, &config, &user).unwrap();
        let second = build(&flags, &config, &user).unwrap();

        assert_eq!(first, second);
        assert!(!first.pipeline_name().is_empty());
    }

    #[test]
    fn serialized_invocation_carries_token_but_redacted_does_not() {
        let invocation = build(
            &publish_flags(PYTHON_GAPIC, "github"),
            &fixtures::artifact_config(),
            &UserConfig::default(),
        )
        .unwrap();

        let full = serde_json::to_value(&invocation).unwrap();
        assert_eq!(full["pipeline_name"], "PublishPipeline");
        assert_eq!(full["arguments"]["github"]["token"], "testtoken");

        let redacted = serde_json::to_value(invocation.redacted()).unwrap();
        assert_eq!(redacted["arguments"]["github"]["token"], "<redacted>");
    }
}
