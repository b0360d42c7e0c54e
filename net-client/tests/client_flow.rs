#[cfg(test)]
mod tests {
    use analysis_state::{
        load_snapshot, save_snapshot, AnalysisPayload, DashboardMetrics,
        Recommendation,
    };
    use kv_storage::{migrations::run_migrations, FileStorage};
    use tempdir::TempDir;
    use user_state::{
        directory::Registration, evaluate_gate, login, register,
        session::{is_signed_in, logout, sign_in},
        GateOutcome, Redirect,
    };

    fn registration() -> Registration {
        Registration {
            full_name: "Marie Curie".to_string(),
            username: "marie.c".to_string(),
            email: "marie@example.com".to_string(),
            password: "radium".to_string(),
            confirm_password: "radium".to_string(),
        }
    }

    #[test]
    fn test_signup_to_dashboard_flow() {
        let temp_dir =
            TempDir::new("client-flow").expect("Failed to create tempdir");
        let storage_path = temp_dir.path().join("state.json");

        let mut store = FileStorage::load_or_default(
            "flow".to_string(),
            &storage_path,
        );
        run_migrations(&mut store).expect("Failed to run migrations");

        assert_eq!(
            evaluate_gate(is_signed_in(&store), "/dashboard/"),
            GateOutcome::Redirect(Redirect::Login)
        );

        register(&mut store, &registration())
            .expect("Failed to register account");
        let user = login(&store, "MARIE@example.com", "radium")
            .expect("Failed to authenticate");
        sign_in(&mut store, &user).expect("Failed to persist session");

        assert_eq!(
            evaluate_gate(is_signed_in(&store), "/dashboard/"),
            GateOutcome::Proceed
        );
        assert_eq!(
            evaluate_gate(is_signed_in(&store), "/login/"),
            GateOutcome::Redirect(Redirect::Dashboard)
        );

        let payload = AnalysisPayload {
            recommendations: vec![Recommendation {
                career_title: Some("Data Scientist".to_string()),
                final_score: Some(88.4),
                job_count: Some(12),
                ..Default::default()
            }],
            ..Default::default()
        };
        save_snapshot(&mut store, "Marie.C", &payload)
            .expect("Failed to store snapshot");

        // Session and snapshot both survive a process restart.
        drop(store);
        let mut store = FileStorage::load("flow".to_string(), &storage_path)
            .expect("Failed to reload storage");

        assert!(is_signed_in(&store));
        let snapshot = load_snapshot(&store, "marie.c")
            .expect("Snapshot should be visible after reload");
        let metrics = DashboardMetrics::project(Some(&snapshot));
        assert_eq!(metrics.resume_score, 88);
        assert_eq!(metrics.job_matches, 1);

        logout(&mut store).expect("Failed to clear session");
        assert!(!is_signed_in(&store));
        assert_eq!(
            evaluate_gate(is_signed_in(&store), "/dashboard/"),
            GateOutcome::Redirect(Redirect::Login)
        );
        // The snapshot belongs to the account, not the session.
        assert!(load_snapshot(&store, "marie.c").is_some());
    }
}
