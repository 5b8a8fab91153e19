#[cfg(test)]
mod tests {
    use crate::{
        error::AppError,
        keys,
        models::{
            event::{EventPatch, EventType, NewEvent},
            player::{NewPlayer, Player, PlayerPatch, PlayerProfile, PlayerStats},
            team::{MatchResult, NewTeam, TeamPatch},
        },
        store::KeyValueStore,
        test::utils::test_store::TestStoreBuilder,
    };
    use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
    use std::collections::HashSet;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn new_player(name: &str, sport: &str) -> NewPlayer {
        NewPlayer {
            name: name.to_string(),
            sport: sport.to_string(),
            position: "Atacante".to_string(),
            team_id: String::new(),
            user_id: None,
            profile: None,
        }
    }

    #[tokio::test]
    async fn test_add_player_then_filter_by_sport() {
        let store = TestStoreBuilder::new().build().await.unwrap();

        store.data.add_player(new_player("Ana", "futebol")).await.unwrap();

        let players = store.data.get_players_by_sport("futebol").await;
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Ana");
        assert!(!players[0].id.is_empty());
        assert_eq!(
            players[0].stats,
            PlayerStats {
                goals: 0,
                assists: 0,
                games: 0,
                cards: 0
            }
        );
        assert!(store.data.get_players_by_sport("vôlei").await.is_empty());
    }

    #[tokio::test]
    async fn test_n_teams_have_unique_ids_and_survive_reload() {
        let store = TestStoreBuilder::new().build().await.unwrap();

        for i in 0..7 {
            store
                .data
                .add_team(NewTeam {
                    name: format!("Time {i}"),
                    sport: "futebol".into(),
                    professor_id: None,
                })
                .await
                .unwrap();
        }

        let teams = store.data.teams().await;
        assert_eq!(teams.len(), 7);
        let ids: HashSet<_> = teams.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 7);

        let recarregado = store.reload().await;
        assert_eq!(recarregado.teams().await, teams);
    }

    #[tokio::test]
    async fn test_player_and_event_roundtrip_through_storage() {
        let store = TestStoreBuilder::new()
            .team("Leões", "futebol")
            .player("Ana", "futebol", "Atacante", Some("Leões"))
            .event("Final", EventType::Jogo, "2030-05-10", "15:00:00")
            .build()
            .await
            .unwrap();

        let player_id = store.player_id("Ana").unwrap().to_string();
        store
            .data
            .update_player(
                &player_id,
                PlayerPatch {
                    profile: Some(PlayerProfile {
                        age: 17,
                        height: Some(1.68),
                        weight: None,
                        photo: None,
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let recarregado = store.reload().await;
        assert_eq!(recarregado.players().await, store.data.players().await);
        assert_eq!(recarregado.events().await, store.data.events().await);

        let gravados: Vec<Player> = store.storage.get_list(keys::PLAYERS).await.unwrap();
        assert_eq!(gravados[0].profile.age, 17);
        assert_eq!(gravados[0].team_id, store.team_id("Leões").unwrap());
    }

    #[tokio::test]
    async fn test_update_player_changes_only_patched_fields() {
        let store = TestStoreBuilder::new()
            .team("Leões", "futebol")
            .player("Ana", "futebol", "Atacante", Some("Leões"))
            .build()
            .await
            .unwrap();
        let id = store.player_id("Ana").unwrap().to_string();
        let antes = store.data.find_player(&id).await.unwrap();

        let depois = store
            .data
            .update_player(
                &id,
                PlayerPatch {
                    position: Some("Goleira".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(depois.position, "Goleira");
        assert_eq!(depois.name, antes.name);
        assert_eq!(depois.sport, antes.sport);
        assert_eq!(depois.team_id, antes.team_id);
        assert_eq!(depois.stats, antes.stats);
        assert_eq!(depois.profile, antes.profile);
        assert_eq!(depois.created_at, antes.created_at);
        assert!(depois.updated_at >= antes.updated_at);

        let lido = store.data.find_player(&id).await.unwrap();
        assert_eq!(lido, depois);
    }

    #[tokio::test]
    async fn test_update_missing_player_is_not_found() {
        let store = TestStoreBuilder::new().build().await.unwrap();
        let result = store.data.update_player("nao-existe", PlayerPatch::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_deleting_team_leaves_dangling_team_id() {
        let store = TestStoreBuilder::new()
            .team("Leões", "futebol")
            .player("Ana", "futebol", "Atacante", Some("Leões"))
            .build()
            .await
            .unwrap();
        let team_id = store.team_id("Leões").unwrap().to_string();

        store.data.delete_team(&team_id).await.unwrap();

        assert!(store.data.find_team(&team_id).await.is_none());
        let ana = store.data.find_player(store.player_id("Ana").unwrap()).await.unwrap();
        assert_eq!(ana.team_id, team_id);
        assert_eq!(store.data.team_name_for_player(&ana).await, None);
        assert_eq!(store.data.get_players_by_team(&team_id).await.len(), 1);

        let again = store.data.delete_team(&team_id).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_team_queries_and_results() {
        let store = TestStoreBuilder::new()
            .team("Leões", "Futebol")
            .team("Águias", "vôlei")
            .player("Ana", "futebol", "Atacante", Some("Leões"))
            .player("Bia", "futebol", "Zagueira", Some("Leões"))
            .build()
            .await
            .unwrap();
        let leoes = store.team_id("Leões").unwrap().to_string();

        let futebol = store.data.get_teams_by_sport("futebol").await;
        assert_eq!(futebol.len(), 1);
        assert_eq!(futebol[0].name, "Leões");

        let resumo = store.data.team_summaries(None).await;
        let leoes_resumo = resumo.iter().find(|s| s.team.id == leoes).unwrap();
        assert_eq!(leoes_resumo.players_count, 2);

        store.data.record_team_result(&leoes, MatchResult::Vitoria).await.unwrap();
        store.data.record_team_result(&leoes, MatchResult::Empate).await.unwrap();
        let team = store
            .data
            .update_team(
                &leoes,
                TeamPatch {
                    name: Some("Leões FC".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!((team.wins, team.losses, team.draws), (1, 0, 1));
        assert_eq!(team.games_played(), 2);
        assert_eq!(team.name, "Leões FC");
    }

    #[tokio::test]
    async fn test_validation_rejects_blank_names() {
        let store = TestStoreBuilder::new()
            .team("Leões", "futebol")
            .player("Ana", "futebol", "Atacante", None)
            .build()
            .await
            .unwrap();

        for nome in ["", "   ", "\t\n"] {
            let result = store.data.add_player(new_player(nome, "futebol")).await;
            assert!(matches!(result, Err(AppError::Validation(_))), "nome {nome:?}");
        }
        let result = store.data.add_player(new_player("Bia", "  ")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = store
            .data
            .add_team(NewTeam {
                name: "   ".into(),
                sport: "  ".into(),
                professor_id: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = store
            .data
            .add_event(NewEvent {
                title: "  ".into(),
                event_type: EventType::Treino,
                sport: "futebol".into(),
                date: date("2030-01-01"),
                time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                description: String::new(),
                location: None,
                team_id: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let ana = store.player_id("Ana").unwrap().to_string();
        let result = store
            .data
            .update_player(
                &ana,
                PlayerPatch {
                    name: Some("  ".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let leoes = store.team_id("Leões").unwrap().to_string();
        let result = store
            .data
            .update_team(
                &leoes,
                TeamPatch {
                    sport: Some(" ".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        assert_eq!(store.data.players().await.len(), 1);
        assert_eq!(store.data.teams().await.len(), 1);
        assert!(store.data.events().await.is_empty());
        assert_eq!(store.data.find_player(&ana).await.unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn test_patches_are_trimmed_like_new_records() {
        let store = TestStoreBuilder::new()
            .team("Leões", "futebol")
            .player("Ana", "futebol", "Atacante", None)
            .event("Treino", EventType::Treino, "2030-03-10", "18:00:00")
            .build()
            .await
            .unwrap();

        let ana = store.player_id("Ana").unwrap().to_string();
        let player = store
            .data
            .update_player(
                &ana,
                PlayerPatch {
                    name: Some("  Ana Souza ".into()),
                    position: Some(" Meia ".into()),
                    sport: Some(" vôlei".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(player.name, "Ana Souza");
        assert_eq!(player.position, "Meia");
        assert_eq!(player.sport, "vôlei");

        let leoes = store.team_id("Leões").unwrap().to_string();
        let team = store
            .data
            .update_team(
                &leoes,
                TeamPatch {
                    name: Some(" Leões FC ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(team.name, "Leões FC");

        let id = store.data.events().await[0].id.clone();
        let event = store
            .data
            .update_event(
                &id,
                EventPatch {
                    title: Some(" Final ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(event.title, "Final");
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_unchanged() {
        let store = TestStoreBuilder::new().build().await.unwrap();

        store.backend.fail_next_writes(10);
        let result = store.data.add_player(new_player("Ana", "futebol")).await;
        assert!(result.is_err());
        assert!(store.data.players().await.is_empty());

        store.backend.fail_next_writes(0);
        store.data.add_player(new_player("Bia", "futebol")).await.unwrap();
        assert_eq!(store.data.players().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_all_persisted() {
        let store = TestStoreBuilder::new().build().await.unwrap();

        let mut handles = Vec::new();
        for i in 0..10 {
            let data = store.data.clone();
            handles.push(tokio::spawn(async move {
                data.add_player(new_player(&format!("Jogador {i}"), "futebol")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let gravados: Vec<Player> = store.storage.get_list(keys::PLAYERS).await.unwrap();
        assert_eq!(gravados.len(), 10);
        assert_eq!(store.reload().await.players().await.len(), 10);
    }

    #[tokio::test]
    async fn test_events_on_day_and_upcoming_order() {
        let store = TestStoreBuilder::new()
            .event("Treino tarde", EventType::Treino, "2030-03-10", "18:00:00")
            .event("Reunião", EventType::Reuniao, "2030-03-10", "09:00:00")
            .event("Jogo", EventType::Jogo, "2030-03-12", "15:00:00")
            .event("Antigo", EventType::Jogo, "2030-03-01", "15:00:00")
            .build()
            .await
            .unwrap();

        let dia = store.data.events_on(date("2030-03-10")).await;
        let titulos: Vec<_> = dia.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titulos, vec!["Reunião", "Treino tarde"]);

        let proximos = store.data.upcoming_events_after(datetime("2030-03-10 09:00:00")).await;
        let titulos: Vec<_> = proximos.iter().map(|e| e.title.as_str()).collect();
        // Estritamente depois: a reunião das 09:00 fica de fora
        assert_eq!(titulos, vec!["Treino tarde", "Jogo"]);
    }

    #[tokio::test]
    async fn test_today_events_use_local_calendar_day() {
        let store = TestStoreBuilder::new().build().await.unwrap();
        let hoje = Local::now().date_naive();
        let amanha = hoje + Duration::days(1);

        for (titulo, dia) in [("Hoje", hoje), ("Amanhã", amanha)] {
            store
                .data
                .add_event(NewEvent {
                    title: titulo.into(),
                    event_type: EventType::Treino,
                    sport: "futebol".into(),
                    date: dia,
                    time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                    description: String::new(),
                    location: Some("Quadra 1".into()),
                    team_id: None,
                })
                .await
                .unwrap();
        }

        let hoje_eventos = store.data.get_today_events().await;
        assert_eq!(hoje_eventos.len(), 1);
        assert_eq!(hoje_eventos[0].title, "Hoje");

        let proximos = store.data.get_upcoming_events().await;
        assert_eq!(proximos.last().unwrap().title, "Amanhã");
    }

    #[tokio::test]
    async fn test_update_and_delete_event() {
        let store = TestStoreBuilder::new()
            .event("Treino", EventType::Treino, "2030-03-10", "18:00:00")
            .build()
            .await
            .unwrap();
        let id = store.data.events().await[0].id.clone();

        let event = store
            .data
            .update_event(
                &id,
                EventPatch {
                    event_type: Some(EventType::Jogo),
                    location: Some("Estádio".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(event.event_type, EventType::Jogo);
        assert_eq!(event.location.as_deref(), Some("Estádio"));
        assert_eq!(event.title, "Treino");

        store.data.delete_event(&id).await.unwrap();
        assert!(store.data.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let store = TestStoreBuilder::new()
            .team("Leões", "futebol")
            .team("Tigres", "Futebol")
            .team("Águias", "vôlei")
            .player("Ana", "futebol", "Atacante", Some("Leões"))
            .event("Hoje", EventType::Treino, "2030-03-10", "18:00:00")
            .event("Depois", EventType::Jogo, "2030-03-11", "18:00:00")
            .build()
            .await
            .unwrap();

        let ana = store.player_id("Ana").unwrap().to_string();
        store
            .data
            .update_player(
                &ana,
                PlayerPatch {
                    stats: Some(PlayerStats {
                        goals: 3,
                        assists: 1,
                        games: 2,
                        cards: 0,
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stats = store.data.stats_at(datetime("2030-03-10 12:00:00")).await;
        assert_eq!(stats.total_times, 3);
        assert_eq!(stats.total_jogadores, 1);
        assert_eq!(stats.total_eventos, 2);
        assert_eq!(stats.eventos_hoje, 1);
        assert_eq!(stats.proximos_eventos, 2);
        assert_eq!(stats.total_gols, 3);
        assert_eq!(stats.total_assistencias, 1);
        assert_eq!(stats.total_jogos, 2);
        assert_eq!(stats.times_por_esporte.get("futebol"), Some(&2));
        assert_eq!(stats.times_por_esporte.get("vôlei"), Some(&1));
    }

    #[tokio::test]
    async fn test_counters_saturate_instead_of_overflowing() {
        let store = TestStoreBuilder::new()
            .team("Leões", "futebol")
            .player("Ana", "futebol", "Atacante", None)
            .player("Bia", "futebol", "Goleira", None)
            .build()
            .await
            .unwrap();

        for nome in ["Ana", "Bia"] {
            let id = store.player_id(nome).unwrap().to_string();
            store
                .data
                .update_player(
                    &id,
                    PlayerPatch {
                        stats: Some(PlayerStats {
                            goals: 3_000_000_000,
                            assists: u32::MAX,
                            games: 3_000_000_000,
                            cards: 0,
                        }),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        let stats = store.data.stats_at(datetime("2030-03-10 12:00:00")).await;
        assert_eq!(stats.total_gols, u32::MAX);
        assert_eq!(stats.total_assistencias, u32::MAX);
        assert_eq!(stats.total_jogos, u32::MAX);

        let leoes = store.team_id("Leões").unwrap().to_string();
        store
            .data
            .update_team(
                &leoes,
                TeamPatch {
                    wins: Some(u32::MAX),
                    draws: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let team = store.data.record_team_result(&leoes, MatchResult::Vitoria).await.unwrap();
        assert_eq!(team.wins, u32::MAX);
        assert_eq!(team.games_played(), u32::MAX);
        assert_eq!(store.data.team_summaries(None).await[0].games_played, u32::MAX);
    }

    #[tokio::test]
    async fn test_confirm_player_stored_rewrites_missing_collection() {
        let store = TestStoreBuilder::new()
            .player("Ana", "futebol", "Atacante", None)
            .build()
            .await
            .unwrap();
        let ana = store.player_id("Ana").unwrap().to_string();

        // O armazenamento perdeu a coleção; a memória ainda a tem
        store.backend.remove_item(keys::PLAYERS).await.unwrap();

        store.data.confirm_player_stored(&ana).await.unwrap();

        let gravados: Vec<Player> = store.storage.get_list(keys::PLAYERS).await.unwrap();
        assert_eq!(gravados.len(), 1);
        assert_eq!(gravados[0].id, ana);
    }
}
