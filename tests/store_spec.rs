use chrono::{Duration, Utc};
use goalboard::models::*;
use goalboard::store::fixtures::{self, FixtureGenerator};
use goalboard::store::{GoalStore, Resolved};
use speculate2::speculate;
use uuid::Uuid;

fn goal_input(
    title: &str,
    category: GoalCategory,
    priority: GoalPriority,
    target: f64,
) -> CreateGoalInput {
    CreateGoalInput {
        title: title.to_string(),
        description: String::new(),
        category,
        priority,
        target,
        unit: "units".to_string(),
        due_date: Utc::now() + Duration::days(30),
        user_id: "1".to_string(),
        team_id: None,
        is_team_goal: false,
    }
}

fn create_test_goal(store: &mut GoalStore) -> Goal {
    store.add(goal_input("Test Goal", GoalCategory::Personal, GoalPriority::Medium, 10.0))
}

fn milestone_input(title: &str) -> CreateMilestoneInput {
    CreateMilestoneInput {
        title: title.to_string(),
        description: String::new(),
        due_date: Utc::now() + Duration::days(7),
        completed: false,
    }
}

fn titles(goals: &[&Goal]) -> Vec<String> {
    goals.iter().map(|g| g.title.clone()).collect()
}

speculate! {
    before {
        let mut store = GoalStore::new(fixtures::current_user());
    }

    describe "add" {
        it "creates a goal with store-assigned fields" {
            let goal = store.add(goal_input("Run 100km", GoalCategory::Health, GoalPriority::High, 100.0));

            assert_eq!(goal.title, "Run 100km");
            assert_eq!(goal.progress, 0.0);
            assert!(!goal.is_completed);
            assert!(goal.milestones.is_empty());
            assert!(goal.comments.is_empty());
            assert!(goal.created_at <= Utc::now());
        }

        it "assigns unique ids and appends in order" {
            let a = create_test_goal(&mut store);
            let b = create_test_goal(&mut store);

            assert_ne!(a.id, b.id);
            assert_eq!(store.goals().len(), 2);
            assert_eq!(store.goals()[0].id, a.id);
            assert_eq!(store.goals()[1].id, b.id);
        }

        it "keeps the collection size equal to adds minus deletes" {
            let ids: Vec<Uuid> = (0..5).map(|_| create_test_goal(&mut store).id).collect();

            assert!(store.delete(ids[1]));
            assert!(store.delete(ids[3]));
            assert!(!store.delete(ids[3]));
            assert!(!store.delete(Uuid::new_v4()));

            assert_eq!(store.goals().len(), 3);
        }

        it "shows new goals in the filtered view when they match" {
            store.filter(FilterUpdate {
                category: Some(FilterValue::Only(GoalCategory::Work)),
                ..Default::default()
            });

            store.add(goal_input("Ship it", GoalCategory::Work, GoalPriority::High, 1.0));
            store.add(goal_input("Stretch", GoalCategory::Health, GoalPriority::Low, 1.0));

            assert_eq!(titles(&store.filtered_goals()), vec!["Ship it"]);
        }
    }

    describe "update" {
        it "merges only the provided fields" {
            let goal = create_test_goal(&mut store);

            let updated = store.update(goal.id, UpdateGoalInput {
                title: Some("Renamed".to_string()),
                priority: Some(GoalPriority::High),
                ..Default::default()
            });

            assert!(updated);
            let stored = store.get(goal.id).unwrap();
            assert_eq!(stored.title, "Renamed");
            assert_eq!(stored.priority, GoalPriority::High);
            assert_eq!(stored.category, GoalCategory::Personal);
            assert_eq!(stored.target, 10.0);
        }

        it "is a no-op for an unknown id" {
            create_test_goal(&mut store);
            let snapshot = store.goals().to_vec();

            let updated = store.update(Uuid::new_v4(), UpdateGoalInput {
                title: Some("Nope".to_string()),
                ..Default::default()
            });

            assert!(!updated);
            assert_eq!(store.goals(), snapshot.as_slice());
        }

        it "refreshes the selected goal" {
            let goal = create_test_goal(&mut store);
            store.select(Some(goal.id));

            store.update(goal.id, UpdateGoalInput {
                description: Some("Now with details".to_string()),
                ..Default::default()
            });

            assert_eq!(store.selected_goal().unwrap().description, "Now with details");
        }

        it "recomputes the filtered view" {
            let goal = create_test_goal(&mut store);
            store.filter(FilterUpdate {
                priority: Some(FilterValue::Only(GoalPriority::Medium)),
                ..Default::default()
            });
            assert_eq!(store.filtered_goals().len(), 1);

            store.update(goal.id, UpdateGoalInput {
                priority: Some(GoalPriority::Low),
                ..Default::default()
            });

            assert!(store.filtered_goals().is_empty());
        }

        it "keeps completion consistent when the target changes" {
            let goal = create_test_goal(&mut store);
            store.update_progress(goal.id, 6.0);

            store.update(goal.id, UpdateGoalInput {
                target: Some(5.0),
                ..Default::default()
            });

            assert!(store.get(goal.id).unwrap().is_completed);
        }
    }

    describe "delete" {
        it "clears the selection when the selected goal is deleted" {
            let goal = create_test_goal(&mut store);
            store.select(Some(goal.id));

            store.delete(goal.id);

            assert!(store.selected_goal().is_none());
            assert!(store.get(goal.id).is_none());
        }

        it "leaves the selection alone when another goal is deleted" {
            let kept = create_test_goal(&mut store);
            let other = create_test_goal(&mut store);
            store.select(Some(kept.id));

            store.delete(other.id);

            assert_eq!(store.selected_goal().map(|g| g.id), Some(kept.id));
        }

        it "removes the goal from the filtered view" {
            let goal = create_test_goal(&mut store);
            store.delete(goal.id);
            assert!(store.filtered_goals().is_empty());
        }
    }

    describe "update_progress" {
        it "sets completion iff progress reaches target" {
            let goal = create_test_goal(&mut store);

            for (progress, expected) in [(0.0, false), (9.0, false), (10.0, true), (15.0, true), (3.0, false)] {
                store.update_progress(goal.id, progress);
                let stored = store.get(goal.id).unwrap();
                assert_eq!(stored.progress, progress);
                assert_eq!(stored.is_completed, expected, "progress {}", progress);
            }
        }

        it "accepts out-of-range values verbatim" {
            let goal = create_test_goal(&mut store);

            store.update_progress(goal.id, -4.0);
            assert_eq!(store.get(goal.id).unwrap().progress, -4.0);

            store.update_progress(goal.id, 250.0);
            assert_eq!(store.get(goal.id).unwrap().progress, 250.0);
        }

        it "refreshes the selection snapshot" {
            let goal = create_test_goal(&mut store);
            store.select(Some(goal.id));

            store.update_progress(goal.id, 10.0);

            let selected = store.selected_goal().unwrap();
            assert_eq!(selected.progress, 10.0);
            assert!(selected.is_completed);
        }

        it "moves goals in and out of a completion filter" {
            let goal = create_test_goal(&mut store);
            store.filter(FilterUpdate {
                completed: Some(FilterValue::Only(true)),
                ..Default::default()
            });
            assert!(store.filtered_goals().is_empty());

            store.update_progress(goal.id, 10.0);
            assert_eq!(
                store.filtered_goals().iter().map(|g| g.id).collect::<Vec<_>>(),
                vec![goal.id]
            );

            store.update_progress(goal.id, 9.5);
            assert!(store.filtered_goals().is_empty());
        }

        it "returns false for an unknown goal" {
            assert!(!store.update_progress(Uuid::new_v4(), 5.0));
        }
    }

    describe "add_comment" {
        it "appends a comment by the current user" {
            let goal = create_test_goal(&mut store);

            store.add_comment(goal.id, "First").unwrap();
            let second = store.add_comment(goal.id, "Second").unwrap();

            let stored = store.get(goal.id).unwrap();
            let contents: Vec<_> = stored.comments.iter().map(|c| c.content.as_str()).collect();
            assert_eq!(contents, vec!["First", "Second"]);
            assert_eq!(second.goal_id, goal.id);
            assert_eq!(second.user, fixtures::current_user());
            assert_eq!(second.user_id, "1");
        }

        it "does not validate content" {
            let goal = create_test_goal(&mut store);
            assert!(store.add_comment(goal.id, "   ").is_some());
        }

        it "is a no-op for an unknown goal" {
            assert!(store.add_comment(Uuid::new_v4(), "Hello").is_none());
        }

        it "refreshes the selection snapshot" {
            let goal = create_test_goal(&mut store);
            store.select(Some(goal.id));

            store.add_comment(goal.id, "Nice");

            assert_eq!(store.selected_goal().unwrap().comments.len(), 1);
        }
    }

    describe "milestones" {
        describe "add_milestone" {
            it "appends a milestone with the caller's completion state" {
                let goal = create_test_goal(&mut store);

                let open = store.add_milestone(goal.id, milestone_input("Plan")).unwrap();
                let done = store.add_milestone(goal.id, CreateMilestoneInput {
                    completed: true,
                    ..milestone_input("Kickoff")
                }).unwrap();

                let stored = store.get(goal.id).unwrap();
                assert_eq!(stored.milestones.len(), 2);
                assert_eq!(stored.milestones[0].id, open.id);
                assert!(!open.completed);
                assert!(done.completed);
                assert_eq!(done.goal_id, goal.id);
            }

            it "is a no-op for an unknown goal" {
                assert!(store.add_milestone(Uuid::new_v4(), milestone_input("Plan")).is_none());
            }
        }

        describe "toggle_milestone" {
            it "flips only the matching milestone" {
                let goal = create_test_goal(&mut store);
                let a = store.add_milestone(goal.id, milestone_input("A")).unwrap();
                let b = store.add_milestone(goal.id, milestone_input("B")).unwrap();

                assert_eq!(store.toggle_milestone(goal.id, a.id), Some(true));

                let stored = store.get(goal.id).unwrap();
                assert!(stored.milestone(a.id).unwrap().completed);
                assert!(!stored.milestone(b.id).unwrap().completed);
            }

            it "restores the original state when toggled twice" {
                let goal = create_test_goal(&mut store);
                let m = store.add_milestone(goal.id, milestone_input("A")).unwrap();

                store.toggle_milestone(goal.id, m.id);
                store.toggle_milestone(goal.id, m.id);

                assert!(!store.get(goal.id).unwrap().milestone(m.id).unwrap().completed);
            }

            it "does not complete the goal" {
                let goal = create_test_goal(&mut store);
                let m = store.add_milestone(goal.id, milestone_input("Only one")).unwrap();

                store.toggle_milestone(goal.id, m.id);

                assert!(!store.get(goal.id).unwrap().is_completed);
            }

            it "ignores unknown ids" {
                let goal = create_test_goal(&mut store);
                let m = store.add_milestone(goal.id, milestone_input("A")).unwrap();

                assert_eq!(store.toggle_milestone(goal.id, Uuid::new_v4()), None);
                assert_eq!(store.toggle_milestone(Uuid::new_v4(), m.id), None);
                assert!(!store.get(goal.id).unwrap().milestone(m.id).unwrap().completed);
            }
        }
    }

    describe "filter" {
        before {
            store.add(goal_input("Work high", GoalCategory::Work, GoalPriority::High, 1.0));
            store.add(goal_input("Work low", GoalCategory::Work, GoalPriority::Low, 1.0));
            store.add(goal_input("Health high", GoalCategory::Health, GoalPriority::High, 1.0));
            let done = store.add(goal_input("Finance low", GoalCategory::Finance, GoalPriority::Low, 1.0));
            store.update_progress(done.id, 1.0);
        }

        it "starts unfiltered" {
            assert!(store.active_filters().is_unfiltered());
            assert_eq!(store.filtered_goals().len(), 4);
        }

        it "combines predicates with AND" {
            store.filter(FilterUpdate {
                category: Some(FilterValue::Only(GoalCategory::Work)),
                priority: Some(FilterValue::Only(GoalPriority::High)),
                ..Default::default()
            });

            assert_eq!(titles(&store.filtered_goals()), vec!["Work high"]);
        }

        it "filters on completion" {
            store.filter(FilterUpdate {
                completed: Some(FilterValue::Only(true)),
                ..Default::default()
            });
            assert_eq!(titles(&store.filtered_goals()), vec!["Finance low"]);

            store.filter(FilterUpdate {
                completed: Some(FilterValue::Only(false)),
                ..Default::default()
            });
            assert_eq!(store.filtered_goals().len(), 3);
        }

        it "keeps omitted predicates from the previous call" {
            store.filter(FilterUpdate {
                category: Some(FilterValue::Only(GoalCategory::Work)),
                ..Default::default()
            });
            store.filter(FilterUpdate {
                priority: Some(FilterValue::Only(GoalPriority::Low)),
                ..Default::default()
            });

            assert_eq!(store.active_filters().category, FilterValue::Only(GoalCategory::Work));
            assert_eq!(titles(&store.filtered_goals()), vec!["Work low"]);
        }

        it "returns everything when all predicates are reset" {
            store.filter(FilterUpdate {
                category: Some(FilterValue::Only(GoalCategory::Health)),
                completed: Some(FilterValue::Only(false)),
                priority: Some(FilterValue::Only(GoalPriority::High)),
            });

            let filters = store.filter(FilterUpdate::reset());

            assert!(filters.is_unfiltered());
            assert_eq!(store.filtered_goals().len(), store.goals().len());
        }

        it "returns exactly the matching subset" {
            let update = FilterUpdate {
                category: Some(FilterValue::Only(GoalCategory::Work)),
                completed: Some(FilterValue::Only(false)),
                ..Default::default()
            };
            let filters = store.filter(update);

            let expected: Vec<&Goal> = store.goals().iter().filter(|g| filters.matches(g)).collect();
            assert_eq!(store.filtered_goals(), expected);
        }
    }

    describe "select" {
        it "snapshots the goal" {
            let goal = create_test_goal(&mut store);
            let selected = store.select(Some(goal.id)).cloned();
            assert_eq!(selected, Some(goal));
        }

        it "clears with None" {
            let goal = create_test_goal(&mut store);
            store.select(Some(goal.id));
            store.select(None);
            assert!(store.selected_goal().is_none());
        }

        it "clears for an unknown id" {
            let goal = create_test_goal(&mut store);
            store.select(Some(goal.id));
            store.select(Some(Uuid::new_v4()));
            assert!(store.selected_goal().is_none());
        }
    }

    describe "resolve" {
        it "finds a goal by full id and by prefix" {
            let goal = create_test_goal(&mut store);
            let full = goal.id.to_string();

            assert!(matches!(store.resolve(&full), Resolved::Found(g) if g.id == goal.id));
            assert!(matches!(store.resolve(&full[..8].to_uppercase()), Resolved::Found(g) if g.id == goal.id));
        }

        it "reports unknown and empty prefixes as not found" {
            create_test_goal(&mut store);
            assert!(matches!(store.resolve(""), Resolved::NotFound));
            assert!(matches!(store.resolve("not-a-uuid"), Resolved::NotFound));
        }

        it "reports ambiguous prefixes" {
            let mut goals = FixtureGenerator::new(Some(1)).generate_goals(2);
            goals[0].id = Uuid::parse_str("aaaaaaaa-0000-4000-8000-000000000001").unwrap();
            goals[1].id = Uuid::parse_str("aaaaaaaa-0000-4000-8000-000000000002").unwrap();
            let seeded = GoalStore::with_goals(fixtures::current_user(), goals);

            assert!(matches!(seeded.resolve("aaaa"), Resolved::Ambiguous));
            assert!(matches!(
                seeded.resolve("aaaaaaaa-0000-4000-8000-000000000002"),
                Resolved::Found(g) if g.title == "Learn a new programming language"
            ));
        }
    }

    describe "seeding" {
        it "starts with the fixture goals visible" {
            let goals = FixtureGenerator::new(Some(1)).generate_goals(10);
            let seeded = GoalStore::with_goals(fixtures::current_user(), goals.clone());

            assert_eq!(seeded.goals(), goals.as_slice());
            assert_eq!(seeded.filtered_goals().len(), 10);
            assert!(seeded.selected_goal().is_none());
        }
    }

    describe "dashboard scenario" {
        it "filters, updates progress and deletes consistently" {
            let a = store.add(goal_input("A", GoalCategory::Work, GoalPriority::High, 100.0));
            store.update_progress(a.id, 50.0);
            let b = store.add(goal_input("B", GoalCategory::Personal, GoalPriority::Low, 10.0));
            store.update_progress(b.id, 10.0);
            let c = store.add(goal_input("C", GoalCategory::Work, GoalPriority::Low, 5.0));

            store.filter(FilterUpdate {
                category: Some(FilterValue::Only(GoalCategory::Work)),
                completed: Some(FilterValue::All),
                priority: Some(FilterValue::All),
            });
            assert_eq!(titles(&store.filtered_goals()), vec!["A", "C"]);

            store.update_progress(b.id, 10.0);
            assert!(store.get(b.id).unwrap().is_completed);

            store.filter(FilterUpdate {
                category: Some(FilterValue::All),
                completed: Some(FilterValue::Only(true)),
                priority: Some(FilterValue::All),
            });
            assert_eq!(titles(&store.filtered_goals()), vec!["B"]);

            store.delete(c.id);
            assert_eq!(titles(&store.goals().iter().collect::<Vec<_>>()), vec!["A", "B"]);

            store.filter(FilterUpdate {
                category: Some(FilterValue::Only(GoalCategory::Work)),
                completed: Some(FilterValue::All),
                priority: Some(FilterValue::All),
            });
            assert_eq!(titles(&store.filtered_goals()), vec!["A"]);
        }
    }
}
