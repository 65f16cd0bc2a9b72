#[cfg(test)]
mod tests {

    mod slug_tests {
        use crate::error::Error;
        use crate::services::slug::{
            assign_slug, base_slug, retry_on_conflict, validate_slug, FALLBACK_SLUG,
        };
        use std::collections::HashSet;

        fn scope_of(taken: &[&str]) -> HashSet<String> {
            taken.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn test_base_slug_basic() {
            assert_eq!(base_slug("Hello World"), "hello-world");
        }

        #[test]
        fn test_base_slug_special_characters() {
            assert_eq!(base_slug("Hello, World!"), "hello-world");
        }

        #[test]
        fn test_base_slug_unicode() {
            assert_eq!(base_slug("Café au lait"), "cafe-au-lait");
        }

        #[test]
        fn test_base_slug_numbers() {
            assert_eq!(base_slug("Article 123"), "article-123");
        }

        #[test]
        fn test_base_slug_multiple_spaces() {
            assert_eq!(base_slug("Hello   World"), "hello-world");
        }

        #[test]
        fn test_base_slug_leading_trailing_spaces() {
            assert_eq!(base_slug("  Hello World  "), "hello-world");
        }

        #[test]
        fn test_base_slug_idempotent() {
            for input in ["My First Project", "Café au lait", "a--b", "  x  "] {
                let once = base_slug(input);
                assert_eq!(base_slug(&once), once);
            }
        }

        #[test]
        fn test_base_slug_whitespace_only_falls_back() {
            assert_eq!(base_slug("   "), FALLBACK_SLUG);
        }

        #[test]
        fn test_base_slug_punctuation_only_falls_back() {
            assert_eq!(base_slug("@@@"), FALLBACK_SLUG);
        }

        #[test]
        fn test_base_slug_empty_falls_back() {
            assert_eq!(base_slug(""), FALLBACK_SLUG);
        }

        #[test]
        fn test_assign_empty_scope() {
            let slug = assign_slug("My First Project", |_| Ok(false)).unwrap();
            assert_eq!(slug, "my-first-project");
        }

        #[test]
        fn test_assign_first_collision() {
            let taken = scope_of(&["my-first-project"]);
            let slug = assign_slug("My First Project", |c| Ok(taken.contains(c))).unwrap();
            assert_eq!(slug, "my-first-project-1");
        }

        #[test]
        fn test_assign_skips_taken_suffixes() {
            let taken = scope_of(&["foo", "foo-1"]);
            let slug = assign_slug("Foo!!", |c| Ok(taken.contains(c))).unwrap();
            assert_eq!(slug, "foo-2");
        }

        #[test]
        fn test_assign_returns_untaken_slug() {
            let taken = scope_of(&["alpha", "alpha-1", "alpha-2", "alpha-3"]);
            let slug = assign_slug("Alpha", |c| Ok(taken.contains(c))).unwrap();
            assert!(!taken.contains(&slug));
        }

        #[test]
        fn test_assign_output_charset() {
            for input in ["Hello, World!", "  @@ Weird -- Input ##", "Ünïcödé Tïtle", "***"] {
                let slug = assign_slug(input, |_| Ok(false)).unwrap();
                assert!(validate_slug(&slug), "invalid slug {:?} from {:?}", slug, input);
                assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            }
        }

        #[test]
        fn test_assign_saturated_scope_terminates() {
            let result = assign_slug("anything", |_| Ok(true));
            match result {
                Err(Error::SlugExhausted { base }) => assert_eq!(base, "anything"),
                other => panic!("expected SlugExhausted, got {:?}", other),
            }
        }

        #[test]
        fn test_assign_propagates_predicate_error() {
            let result = assign_slug("anything", |_| {
                Err(Error::Validation("storage is down".into()))
            });
            assert!(matches!(result, Err(Error::Validation(_))));
        }

        #[test]
        fn test_assign_does_not_retry_on_predicate_error() {
            let mut calls = 0;
            let _ = assign_slug("anything", |_| {
                calls += 1;
                Err(Error::Validation("storage is down".into()))
            });
            assert_eq!(calls, 1);
        }

        #[test]
        fn test_retry_on_conflict_retries_unique_violations() {
            let conn = rusqlite::Connection::open_in_memory().unwrap();
            conn.execute_batch("CREATE TABLE t (slug TEXT NOT NULL UNIQUE);")
                .unwrap();
            conn.execute("INSERT INTO t (slug) VALUES ('foo')", [])
                .unwrap();

            let mut attempt = 0;
            let result = retry_on_conflict(|| {
                attempt += 1;
                // first attempt collides, second succeeds with a fresh slug
                let slug = if attempt == 1 { "foo" } else { "foo-1" };
                conn.execute("INSERT INTO t (slug) VALUES (?)", [slug])?;
                Ok(slug.to_string())
            });

            assert_eq!(result.unwrap(), "foo-1");
            assert_eq!(attempt, 2);
        }

        #[test]
        fn test_retry_on_conflict_gives_up_after_bound() {
            let conn = rusqlite::Connection::open_in_memory().unwrap();
            conn.execute_batch("CREATE TABLE t (slug TEXT NOT NULL UNIQUE);")
                .unwrap();
            conn.execute("INSERT INTO t (slug) VALUES ('foo')", [])
                .unwrap();

            let mut attempts = 0;
            let result: crate::error::Result<()> = retry_on_conflict(|| {
                attempts += 1;
                conn.execute("INSERT INTO t (slug) VALUES ('foo')", [])?;
                Ok(())
            });

            assert!(matches!(result, Err(Error::Database(_))));
            assert_eq!(attempts, 3);
        }

        #[test]
        fn test_retry_on_conflict_passes_other_errors_through() {
            let mut attempts = 0;
            let result: crate::error::Result<()> = retry_on_conflict(|| {
                attempts += 1;
                Err(Error::Validation("nope".into()))
            });
            assert!(matches!(result, Err(Error::Validation(_))));
            assert_eq!(attempts, 1);
        }

        #[test]
        fn test_validate_slug_valid() {
            assert!(validate_slug("hello-world"));
            assert!(validate_slug("my-project-2024"));
            assert!(validate_slug("a"));
            assert!(validate_slug("123"));
        }

        #[test]
        fn test_validate_slug_invalid() {
            assert!(!validate_slug(""));
            assert!(!validate_slug("Hello-World"));
            assert!(!validate_slug("hello_world"));
            assert!(!validate_slug("hello world"));
            assert!(!validate_slug(&"a".repeat(201)));
        }
    }

    mod auth_tests {
        use crate::services::auth::{
            generate_access_token, hash_password, validate_password, verify_password,
        };

        #[test]
        fn test_hash_password_produces_hash() {
            let hash = hash_password("password123").unwrap();
            assert!(!hash.is_empty());
            assert!(hash.starts_with("$argon2"));
        }

        #[test]
        fn test_hash_password_unique() {
            let hash1 = hash_password("password123").unwrap();
            let hash2 = hash_password("password123").unwrap();
            // Same password should produce different hashes (due to salt)
            assert_ne!(hash1, hash2);
        }

        #[test]
        fn test_hash_password_rejects_short() {
            assert!(hash_password("short").is_err());
        }

        #[test]
        fn test_validate_password_minimum_length() {
            assert!(validate_password("1234567").is_err());
            assert!(validate_password("12345678").is_ok());
        }

        #[test]
        fn test_verify_password_correct() {
            let hash = hash_password("password123").unwrap();
            assert!(verify_password("password123", &hash));
        }

        #[test]
        fn test_verify_password_incorrect() {
            let hash = hash_password("password123").unwrap();
            assert!(!verify_password("wrongpassword", &hash));
        }

        #[test]
        fn test_verify_password_invalid_hash() {
            assert!(!verify_password("password123", "invalid-hash"));
        }

        #[test]
        fn test_generate_access_token_length() {
            let token = generate_access_token();
            // Base64 encoded 32 bytes without padding = ~43 chars
            assert!(token.len() >= 40);
        }

        #[test]
        fn test_generate_access_token_unique() {
            let token1 = generate_access_token();
            let token2 = generate_access_token();
            assert_ne!(token1, token2);
        }

        #[test]
        fn test_generate_access_token_url_safe() {
            let token = generate_access_token();
            assert!(token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }

    mod task_model_tests {
        use crate::models::{Priority, TaskStatus};
        use std::str::FromStr;

        #[test]
        fn test_task_status_from_str() {
            assert_eq!(TaskStatus::from_str("TODO").unwrap(), TaskStatus::Todo);
            assert_eq!(TaskStatus::from_str("DOING").unwrap(), TaskStatus::Doing);
            assert_eq!(TaskStatus::from_str("DONE").unwrap(), TaskStatus::Done);
        }

        #[test]
        fn test_task_status_from_str_case_insensitive() {
            assert_eq!(TaskStatus::from_str("todo").unwrap(), TaskStatus::Todo);
            assert_eq!(TaskStatus::from_str("Doing").unwrap(), TaskStatus::Doing);
        }

        #[test]
        fn test_task_status_from_str_invalid() {
            assert!(TaskStatus::from_str("invalid").is_err());
            assert!(TaskStatus::from_str("").is_err());
        }

        #[test]
        fn test_task_status_roundtrip() {
            for status in [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done] {
                let string = status.to_string();
                let parsed = TaskStatus::from_str(&string).unwrap();
                assert_eq!(status, parsed);
            }
        }

        #[test]
        fn test_task_status_default() {
            assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        }

        #[test]
        fn test_task_status_wire_format() {
            assert_eq!(
                serde_json::to_string(&TaskStatus::Doing).unwrap(),
                "\"DOING\""
            );
            let parsed: TaskStatus = serde_json::from_str("\"DONE\"").unwrap();
            assert_eq!(parsed, TaskStatus::Done);
        }

        #[test]
        fn test_priority_roundtrip() {
            for priority in [
                Priority::VeryHigh,
                Priority::High,
                Priority::Medium,
                Priority::Low,
                Priority::VeryLow,
            ] {
                let string = priority.to_string();
                let parsed = Priority::from_str(&string).unwrap();
                assert_eq!(priority, parsed);
            }
        }

        #[test]
        fn test_priority_default() {
            assert_eq!(Priority::default(), Priority::Medium);
        }

        #[test]
        fn test_priority_wire_format() {
            assert_eq!(
                serde_json::to_string(&Priority::VeryHigh).unwrap(),
                "\"VERY_HIGH\""
            );
            let parsed: Priority = serde_json::from_str("\"VERY_LOW\"").unwrap();
            assert_eq!(parsed, Priority::VeryLow);
        }
    }

    mod config_tests {
        use crate::Config;
        use std::path::Path;

        #[test]
        fn test_config_load_missing_file() {
            let result = Config::load(Path::new("/nonexistent/path.toml"));
            assert!(result.is_err());
        }

        #[test]
        fn test_config_load_valid_toml() {
            use std::io::Write;
            let temp_dir = std::env::temp_dir();
            let config_path = temp_dir.join("test_trellis_config.toml");

            let config_content = r#"
[server]
host = "127.0.0.1"
port = 4000

[database]
path = "data/trellis.db"
"#;

            let mut file = std::fs::File::create(&config_path).unwrap();
            file.write_all(config_content.as_bytes()).unwrap();

            let config = Config::load(&config_path).unwrap();
            assert_eq!(config.server.port, 4000);
            assert_eq!(config.database.path, "data/trellis.db");
            // [auth] omitted: lifetime falls back to the default
            assert_eq!(config.auth.session_lifetime_days, 7);

            std::fs::remove_file(&config_path).ok();
        }

        #[test]
        fn test_config_rejects_zero_lifetime() {
            use std::io::Write;
            let temp_dir = std::env::temp_dir();
            let config_path = temp_dir.join("test_trellis_config_bad.toml");

            let config_content = r#"
[server]

[database]
path = "data/trellis.db"

[auth]
session_lifetime_days = 0
"#;

            let mut file = std::fs::File::create(&config_path).unwrap();
            file.write_all(config_content.as_bytes()).unwrap();

            assert!(Config::load(&config_path).is_err());

            std::fs::remove_file(&config_path).ok();
        }
    }
}
