#[cfg(test)]
pub mod test_store {
    use crate::{
        error::AppError,
        models::{
            event::{EventType, NewEvent},
            player::NewPlayer,
            team::NewTeam,
            user::{SignUpForm, UserType},
        },
        retry::RetryPolicy,
        services::{app_data::AppData, auth_service},
        store::{MemoryKvStore, Storage},
    };
    use chrono::{NaiveDate, NaiveTime};
    use std::{collections::HashMap, sync::Arc, sync::Once, time::Duration};

    static INIT: Once = Once::new();
    pub static STANDARD_PASSWORD: &str = "senha123";

    pub fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        }
    }

    pub fn init_tracing() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("gestao_times=debug")
                .with_test_writer()
                .try_init();
        });
    }

    struct TestPlayer {
        name: String,
        sport: String,
        position: String,
        team_name: Option<String>,
    }

    #[derive(Default)]
    pub struct TestStoreBuilder {
        users: Vec<SignUpForm>,
        teams: Vec<(String, String)>,
        players: Vec<TestPlayer>,
        events: Vec<NewEvent>,
    }

    pub struct TestStore {
        pub backend: Arc<MemoryKvStore>,
        pub storage: Arc<Storage>,
        pub data: Arc<AppData>,
        user_ids: HashMap<String, String>,
        team_ids: HashMap<String, String>,
        player_ids: HashMap<String, String>,
    }

    impl TestStoreBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn professor(mut self, name: &str, email: &str) -> Self {
            self.users.push(SignUpForm {
                name: name.to_string(),
                email: email.to_string(),
                password: STANDARD_PASSWORD.to_string(),
                user_type: UserType::Professor,
                avatar: None,
                professor_id: None,
                sport: None,
                position: None,
            });
            self
        }

        pub fn atleta(mut self, name: &str, email: &str, sport: &str, position: &str) -> Self {
            self.users.push(SignUpForm {
                name: name.to_string(),
                email: email.to_string(),
                password: STANDARD_PASSWORD.to_string(),
                user_type: UserType::Atleta,
                avatar: None,
                professor_id: None,
                sport: Some(sport.to_string()),
                position: Some(position.to_string()),
            });
            self
        }

        pub fn team(mut self, name: &str, sport: &str) -> Self {
            self.teams.push((name.to_string(), sport.to_string()));
            self
        }

        pub fn player(mut self, name: &str, sport: &str, position: &str, team: Option<&str>) -> Self {
            self.players.push(TestPlayer {
                name: name.to_string(),
                sport: sport.to_string(),
                position: position.to_string(),
                team_name: team.map(String::from),
            });
            self
        }

        pub fn event(mut self, title: &str, event_type: EventType, date: &str, time: &str) -> Self {
            self.events.push(NewEvent {
                title: title.to_string(),
                event_type,
                sport: "futebol".to_string(),
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("data de teste inválida"),
                time: NaiveTime::parse_from_str(time, "%H:%M:%S").expect("hora de teste inválida"),
                description: String::new(),
                location: None,
                team_id: None,
            });
            self
        }

        pub async fn build(self) -> Result<TestStore, AppError> {
            init_tracing();

            let backend = Arc::new(MemoryKvStore::new());
            let storage = Arc::new(Storage::new(backend.clone(), fast_retry()));
            let data = Arc::new(AppData::load(storage.clone()).await?);

            let mut user_ids = HashMap::new();
            for form in self.users {
                let email = form.email.clone();
                let user = auth_service::register_user(&storage, &data, form).await?;
                user_ids.insert(email, user.id);
            }

            let mut team_ids = HashMap::new();
            for (name, sport) in self.teams {
                let team = data
                    .add_team(NewTeam {
                        name: name.clone(),
                        sport,
                        professor_id: None,
                    })
                    .await?;
                team_ids.insert(name, team.id);
            }

            let mut player_ids = HashMap::new();
            for p in self.players {
                let team_id = p
                    .team_name
                    .as_ref()
                    .and_then(|t| team_ids.get(t).cloned())
                    .unwrap_or_default();
                let player = data
                    .add_player(NewPlayer {
                        name: p.name.clone(),
                        sport: p.sport,
                        position: p.position,
                        team_id,
                        user_id: None,
                        profile: None,
                    })
                    .await?;
                player_ids.insert(p.name, player.id);
            }

            for event in self.events {
                data.add_event(event).await?;
            }

            Ok(TestStore {
                backend,
                storage,
                data,
                user_ids,
                team_ids,
                player_ids,
            })
        }
    }

    impl TestStore {
        pub fn user_id(&self, email: &str) -> Option<&str> {
            self.user_ids.get(email).map(String::as_str)
        }

        pub fn team_id(&self, name: &str) -> Option<&str> {
            self.team_ids.get(name).map(String::as_str)
        }

        pub fn player_id(&self, name: &str) -> Option<&str> {
            self.player_ids.get(name).map(String::as_str)
        }

        /// Simula um novo arranque: relê tudo do armazenamento.
        pub async fn reload(&self) -> AppData {
            AppData::load(self.storage.clone())
                .await
                .expect("Falha ao recarregar os dados")
        }
    }
}
