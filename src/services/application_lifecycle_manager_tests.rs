// src/services/application_lifecycle_manager_tests.rs
//
// Lifecycle manager scenarios
//
// INVARIANTS TESTED:
// - Only table edges succeed, and only for the listed role
// - Terminal statuses never move
// - Candidates act on their own applications, companies on their own jobs
// - A blocking application prevents a second submission for the pair
// - Nothing is emitted when a command fails

#[cfg(test)]
mod lifecycle_tests {
    use std::sync::Arc;

    use crate::domain::{
        Actor, ApplicationId, ApplicationStatus, CandidateId, CompanyId, Job, JobApplication,
        JobId, JobType, ReapplyPolicy, Role, TRANSITIONS,
    };
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::repositories::{
        ApplicationRepository, InMemoryApplicationRepository, InMemoryJobRepository,
        MockApplicationRepository, MockJobRepository,
    };
    use crate::services::{ApplicationLifecycleManager, CreateApplicationRequest};

    const CANDIDATE: &str = "cand-1";
    const COMPANY: &str = "acme";
    const JOB: &str = "job-1";

    fn job(id: &str, company: &str) -> Job {
        Job {
            id: JobId::new(id),
            company_id: CompanyId::new(company),
            position: "Backend Engineer".to_string(),
            location: "Berlin".to_string(),
            experience: "3 years".to_string(),
            description: "APIs".to_string(),
            skills: vec!["Rust".to_string()],
            job_type: JobType::FullTime,
            posted_at: None,
        }
    }

    struct Fixture {
        manager: ApplicationLifecycleManager,
        applications: Arc<InMemoryApplicationRepository>,
        bus: Arc<EventBus>,
    }

    fn fixture(policy: ReapplyPolicy) -> Fixture {
        let applications = Arc::new(InMemoryApplicationRepository::new());
        let jobs = Arc::new(InMemoryJobRepository::with_jobs(vec![
            job(JOB, COMPANY),
            job("job-2", "globex"),
        ]));
        let bus = Arc::new(EventBus::new());
        let manager = ApplicationLifecycleManager::new(
            applications.clone(),
            jobs,
            Arc::clone(&bus),
        )
        .with_reapply_policy(policy);
        Fixture {
            manager,
            applications,
            bus,
        }
    }

    fn candidate() -> Actor {
        Actor::candidate(&CandidateId::new(CANDIDATE))
    }

    fn company() -> Actor {
        Actor::company(&CompanyId::new(COMPANY))
    }

    fn request(job_id: &str) -> CreateApplicationRequest {
        CreateApplicationRequest {
            candidate_id: CandidateId::new(CANDIDATE),
            job_id: JobId::new(job_id),
            qualification: "MSc Computer Science".to_string(),
            resume_link: "https://cv.example.com/cand-1".to_string(),
        }
    }

    async fn apply(f: &Fixture) -> JobApplication {
        f.manager
            .create_application(&candidate(), request(JOB))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_apply_then_company_moves_to_interviewing() {
        let f = fixture(ReapplyPolicy::default());
        let app = apply(&f).await;
        assert_eq!(app.status, ApplicationStatus::Applied);

        let updated = f
            .manager
            .request_transition(&app.id, &company(), ApplicationStatus::Interviewing)
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Interviewing);

        let err = f
            .manager
            .request_transition(&app.id, &company(), ApplicationStatus::Accepted)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));

        assert_eq!(f.bus.emitted_count("ApplicationSubmitted"), 1);
        assert_eq!(f.bus.emitted_count("ApplicationStatusChanged"), 1);
    }

    #[tokio::test]
    async fn test_duplicate_while_active_is_rejected() {
        for status in [
            ApplicationStatus::Applied,
            ApplicationStatus::Interviewing,
            ApplicationStatus::Offered,
        ] {
            let f = fixture(ReapplyPolicy::default());
            let app = apply(&f).await;
            f.applications.force_status(&app.id, status);

            let err = f
                .manager
                .create_application(&candidate(), request(JOB))
                .await
                .unwrap_err();
            assert!(
                matches!(err, AppError::DuplicateApplication { .. }),
                "{} should block re-applying",
                status
            );
            assert_eq!(f.bus.emitted_count("ApplicationSubmitted"), 1);
        }
    }

    #[tokio::test]
    async fn test_reapply_after_withdrawal_is_allowed_by_default() {
        let f = fixture(ReapplyPolicy::AfterClosed);
        let first = apply(&f).await;
        f.manager
            .request_transition(&first.id, &candidate(), ApplicationStatus::Withdrawn)
            .await
            .unwrap();

        let second = f
            .manager
            .create_application(&candidate(), request(JOB))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);

        let resolved = f
            .manager
            .application_for_job(&CandidateId::new(CANDIDATE), &JobId::new(JOB))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.id, second.id);
    }

    #[tokio::test]
    async fn test_reapply_after_withdrawal_blocked_under_never() {
        let f = fixture(ReapplyPolicy::Never);
        let first = apply(&f).await;
        f.manager
            .request_transition(&first.id, &candidate(), ApplicationStatus::Withdrawn)
            .await
            .unwrap();

        let err = f
            .manager
            .create_application(&candidate(), request(JOB))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateApplication { .. }));
        assert!(!f
            .manager
            .can_apply(&CandidateId::new(CANDIDATE), &JobId::new(JOB))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_accepted_application_blocks_reapply() {
        let f = fixture(ReapplyPolicy::AfterClosed);
        let app = apply(&f).await;
        f.applications.force_status(&app.id, ApplicationStatus::Accepted);

        let err = f
            .manager
            .create_application(&candidate(), request(JOB))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateApplication { .. }));
    }

    #[tokio::test]
    async fn test_resolve_before_and_after_applying() {
        let f = fixture(ReapplyPolicy::default());
        let candidate_id = CandidateId::new(CANDIDATE);
        let job_id = JobId::new(JOB);

        assert!(f
            .manager
            .application_for_job(&candidate_id, &job_id)
            .await
            .unwrap()
            .is_none());

        let app = apply(&f).await;
        let resolved = f
            .manager
            .application_for_job(&candidate_id, &job_id)
            .await
            .unwrap();
        assert_eq!(resolved.map(|a| a.id), Some(app.id));
    }

    #[tokio::test]
    async fn test_every_non_table_pair_is_rejected() {
        let roles = [Role::Candidate, Role::Company, Role::Admin];
        for from in ApplicationStatus::ALL {
            for to in ApplicationStatus::ALL {
                for role in roles {
                    let allowed = TRANSITIONS
                        .iter()
                        .any(|t| t.from == from && t.to == to && t.actor == role);
                    if allowed {
                        continue;
                    }

                    let f = fixture(ReapplyPolicy::default());
                    let app = apply(&f).await;
                    f.applications.force_status(&app.id, from);
                    let actor = match role {
                        Role::Candidate => candidate(),
                        Role::Company => company(),
                        Role::Admin => Actor::admin("root"),
                    };

                    let err = f
                        .manager
                        .request_transition(&app.id, &actor, to)
                        .await
                        .unwrap_err();
                    assert!(
                        matches!(err, AppError::InvalidTransition { .. }),
                        "{} -> {} by {} should fail",
                        from,
                        to,
                        role
                    );
                    assert_eq!(f.bus.emitted_count("ApplicationStatusChanged"), 0);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_terminal_states_never_move() {
        for terminal in [
            ApplicationStatus::Rejected,
            ApplicationStatus::Accepted,
            ApplicationStatus::Withdrawn,
        ] {
            let f = fixture(ReapplyPolicy::default());
            let app = apply(&f).await;
            f.applications.force_status(&app.id, terminal);

            for to in ApplicationStatus::ALL {
                for actor in [candidate(), company()] {
                    assert!(f
                        .manager
                        .request_transition(&app.id, &actor, to)
                        .await
                        .is_err());
                }
            }
        }
    }

    #[tokio::test]
    async fn test_other_candidate_cannot_withdraw() {
        let f = fixture(ReapplyPolicy::default());
        let app = apply(&f).await;
        let stranger = Actor::candidate(&CandidateId::new("cand-2"));

        let err = f
            .manager
            .request_transition(&app.id, &stranger, ApplicationStatus::Withdrawn)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
        assert_eq!(
            f.manager.application(&app.id).await.unwrap().status,
            ApplicationStatus::Applied
        );
    }

    #[tokio::test]
    async fn test_company_cannot_touch_other_companies_jobs() {
        let f = fixture(ReapplyPolicy::default());
        let app = f
            .manager
            .create_application(&candidate(), request("job-2"))
            .await
            .unwrap();

        let err = f
            .manager
            .request_transition(&app.id, &company(), ApplicationStatus::Rejected)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not own"));
    }

    #[tokio::test]
    async fn test_candidate_cannot_apply_for_someone_else() {
        let f = fixture(ReapplyPolicy::default());
        let impostor = Actor::candidate(&CandidateId::new("cand-9"));
        let err = f
            .manager
            .create_application(&impostor, request(JOB))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let f = fixture(ReapplyPolicy::default());

        let mut blank = request(JOB);
        blank.qualification = "  ".to_string();
        assert!(matches!(
            f.manager.create_application(&candidate(), blank).await,
            Err(AppError::Validation(_))
        ));

        let mut bad_link = request(JOB);
        bad_link.resume_link = "my resume".to_string();
        assert!(matches!(
            f.manager.create_application(&candidate(), bad_link).await,
            Err(AppError::Validation(_))
        ));

        assert!(matches!(
            f.manager
                .create_application(&candidate(), request("no-such-job"))
                .await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(f.bus.emitted_count("ApplicationSubmitted"), 0);
    }

    #[tokio::test]
    async fn test_unknown_application_is_not_found() {
        let f = fixture(ReapplyPolicy::default());
        let err = f
            .manager
            .request_transition(
                &ApplicationId::new("missing"),
                &company(),
                ApplicationStatus::Offered,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_candidate_offer_flow() {
        let f = fixture(ReapplyPolicy::default());
        let app = apply(&f).await;

        f.manager
            .request_transition(&app.id, &company(), ApplicationStatus::Offered)
            .await
            .unwrap();
        let current = f.manager.application(&app.id).await.unwrap();
        assert_eq!(
            ApplicationLifecycleManager::available_actions(&current, Role::Candidate),
            vec![ApplicationStatus::Accepted, ApplicationStatus::Withdrawn]
        );
        assert!(ApplicationLifecycleManager::available_actions(&current, Role::Company).is_empty());

        let accepted = f
            .manager
            .request_transition(&app.id, &candidate(), ApplicationStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(accepted.status, ApplicationStatus::Accepted);
    }

    #[tokio::test]
    async fn test_applications_for_job_forwards_status_filter() {
        let f = fixture(ReapplyPolicy::default());
        let app = apply(&f).await;
        f.applications.force_status(&app.id, ApplicationStatus::Offered);
        f.applications
            .create(&crate::domain::NewApplication {
                candidate_id: CandidateId::new("cand-2"),
                job_id: JobId::new(JOB),
                qualification: "BSc".to_string(),
                resume_link: "https://cv.example.com/2".to_string(),
            })
            .await
            .unwrap();

        let job_id = JobId::new(JOB);
        assert_eq!(
            f.manager.applications_for_job(&job_id, None).await.unwrap().len(),
            2
        );
        let offered = f
            .manager
            .applications_for_job(&job_id, Some(ApplicationStatus::Offered))
            .await
            .unwrap();
        assert_eq!(offered.len(), 1);
        assert_eq!(
            f.manager
                .applications_with_status(ApplicationStatus::Applied)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_only_admin_deletes() {
        let f = fixture(ReapplyPolicy::default());
        let app = apply(&f).await;

        assert!(matches!(
            f.manager.delete_application(&app.id, &company()).await,
            Err(AppError::InvalidTransition { .. })
        ));

        f.manager
            .delete_application(&app.id, &Actor::admin("root"))
            .await
            .unwrap();
        assert!(f.manager.all_applications().await.unwrap().is_empty());
        assert_eq!(f.bus.emitted_count("ApplicationDeleted"), 1);
    }

    // ------------------------------------------------------------------------
    // Backend failures, through mocked repositories
    // ------------------------------------------------------------------------

    fn submitted(status: ApplicationStatus) -> JobApplication {
        let mut app = JobApplication::submitted(
            ApplicationId::new("a-1"),
            crate::domain::NewApplication {
                candidate_id: CandidateId::new(CANDIDATE),
                job_id: JobId::new(JOB),
                qualification: "BSc".to_string(),
                resume_link: "https://cv.example.com".to_string(),
            },
        );
        app.status = status;
        app
    }

    #[tokio::test]
    async fn test_lost_race_reports_status_we_saw() {
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_get_by_id()
            .returning(|_| Ok(Some(submitted(ApplicationStatus::Interviewing))));
        applications
            .expect_update_status()
            .times(1)
            .returning(|_, to| {
                Err(AppError::invalid_transition(
                    "current",
                    to,
                    "application already withdrawn",
                ))
            });

        let mut jobs = MockJobRepository::new();
        jobs.expect_get_by_id()
            .returning(|_| Ok(Some(job(JOB, COMPANY))));

        let bus = Arc::new(EventBus::new());
        let manager =
            ApplicationLifecycleManager::new(Arc::new(applications), Arc::new(jobs), bus.clone());

        let err = manager
            .request_transition(&ApplicationId::new("a-1"), &company(), ApplicationStatus::Offered)
            .await
            .unwrap_err();

        match err {
            AppError::InvalidTransition { from, to, reason } => {
                assert_eq!(from, "Interviewing");
                assert_eq!(to, "Offered");
                assert_eq!(reason, "application already withdrawn");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(bus.emitted_count("ApplicationStatusChanged"), 0);
    }

    #[tokio::test]
    async fn test_rejected_transition_never_reaches_backend() {
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_get_by_id()
            .returning(|_| Ok(Some(submitted(ApplicationStatus::Applied))));
        applications.expect_update_status().never();

        let jobs = MockJobRepository::new();
        let manager = ApplicationLifecycleManager::new(
            Arc::new(applications),
            Arc::new(jobs),
            Arc::new(EventBus::new()),
        );

        let err = manager
            .request_transition(&ApplicationId::new("a-1"), &candidate(), ApplicationStatus::Accepted)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_persists_status_produced_by_entity_transition() {
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_get_by_id()
            .returning(|_| Ok(Some(submitted(ApplicationStatus::Offered))));
        applications
            .expect_update_status()
            .withf(|id, status| id.as_str() == "a-1" && *status == ApplicationStatus::Withdrawn)
            .times(1)
            .returning(|_, status| Ok(submitted(status)));

        let manager = ApplicationLifecycleManager::new(
            Arc::new(applications),
            Arc::new(MockJobRepository::new()),
            Arc::new(EventBus::new()),
        );

        let updated = manager
            .request_transition(&ApplicationId::new("a-1"), &candidate(), ApplicationStatus::Withdrawn)
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Withdrawn);
    }

    #[tokio::test]
    async fn test_network_failure_propagates_on_create() {
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_list_by_candidate()
            .returning(|_| Err(AppError::Network("connection reset".to_string())));
        applications.expect_create().never();

        let mut jobs = MockJobRepository::new();
        jobs.expect_get_by_id()
            .returning(|_| Ok(Some(job(JOB, COMPANY))));

        let bus = Arc::new(EventBus::new());
        let manager =
            ApplicationLifecycleManager::new(Arc::new(applications), Arc::new(jobs), bus.clone());

        let err = manager
            .create_application(&candidate(), request(JOB))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(bus.emitted_count("ApplicationSubmitted"), 0);
    }

    #[test]
    fn test_pure_helpers_delegate() {
        let mut apps = vec![
            submitted(ApplicationStatus::Offered),
            submitted(ApplicationStatus::Applied),
        ];
        assert_eq!(
            ApplicationLifecycleManager::filter_by_status(&apps, None).len(),
            2
        );
        assert_eq!(
            ApplicationLifecycleManager::filter_by_status(&apps, Some(ApplicationStatus::Offered))
                .len(),
            1
        );
        ApplicationLifecycleManager::sort_by_recency(&mut apps);
        assert_eq!(ApplicationLifecycleManager::recent_applications(&apps, 1).len(), 1);

        let jobs = vec![job(JOB, COMPANY)];
        assert_eq!(
            ApplicationLifecycleManager::filter_by_location_substring(&jobs, "BER").len(),
            1
        );
        assert!(ApplicationLifecycleManager::resolve_application_for_job(
            &apps,
            &JobId::new("other"),
            &CandidateId::new(CANDIDATE)
        )
        .is_none());
    }
}
