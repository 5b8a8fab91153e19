// src/services/app_data.rs
use crate::{
    error::{AppError, AppResult},
    keys,
    models::{
        event::{Event, EventPatch, NewEvent},
        player::{Feedback, NewPlayer, Player, PlayerPatch, PlayerView},
        same_sport,
        stats::{DashboardStats, StatRecord},
        team::{MatchResult, NewTeam, Team, TeamPatch, TeamSummary},
    },
    retry,
    store::Storage,
};
use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

/// Times, jogadores e eventos carregados uma vez em memória.
///
/// Cada mutação copia a coleção, aplica a alteração, grava a coleção inteira e
/// só então troca o estado em memória. O lock de escrita de cada coleção fica
/// preso durante a gravação, por isso duas mutações seguidas nunca perdem a
/// escrita uma da outra.
pub struct AppData {
    storage: Arc<Storage>,
    teams: RwLock<Vec<Team>>,
    players: RwLock<Vec<Player>>,
    events: RwLock<Vec<Event>>,
}

impl AppData {
    pub async fn load(storage: Arc<Storage>) -> AppResult<Self> {
        let teams: Vec<Team> = storage.get_list(keys::TEAMS).await?;
        let players: Vec<Player> = storage.get_list(keys::PLAYERS).await?;
        let events: Vec<Event> = storage.get_list(keys::EVENTS).await?;
        tracing::info!(
            "📦 Dados carregados: {} times, {} jogadores, {} eventos.",
            teams.len(),
            players.len(),
            events.len()
        );

        Ok(Self {
            storage,
            teams: RwLock::new(teams),
            players: RwLock::new(players),
            events: RwLock::new(events),
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    // Copia, altera, grava e troca. Nada muda em memória se `f` ou a escrita falharem.
    async fn mutate<T, R, F>(&self, key: &str, colecao: &RwLock<Vec<T>>, f: F) -> AppResult<R>
    where
        T: Clone + Serialize,
        F: FnOnce(&mut Vec<T>) -> AppResult<R>,
    {
        let mut atual = colecao.write().await;
        let mut copia = atual.clone();
        let resultado = f(&mut copia)?;
        self.storage.set_json(key, &copia).await?;
        *atual = copia;
        Ok(resultado)
    }

    // --- Times ---

    pub async fn teams(&self) -> Vec<Team> {
        self.teams.read().await.clone()
    }

    pub async fn find_team(&self, id: &str) -> Option<Team> {
        self.teams.read().await.iter().find(|t| t.id == id).cloned()
    }

    pub async fn add_team(&self, new: NewTeam) -> AppResult<Team> {
        new.validate()?;
        let team = Team {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            sport: new.sport.trim().to_string(),
            wins: 0,
            losses: 0,
            draws: 0,
            created_at: Utc::now(),
            professor_id: new.professor_id,
        };
        let novo = team.clone();
        self.mutate(keys::TEAMS, &self.teams, move |teams| {
            teams.push(novo);
            Ok(())
        })
        .await?;
        tracing::info!("✅ Time '{}' criado ({}).", team.name, team.id);
        Ok(team)
    }

    pub async fn update_team(&self, id: &str, patch: TeamPatch) -> AppResult<Team> {
        patch.validate()?;
        let team = self
            .mutate(keys::TEAMS, &self.teams, |teams| {
                let team = find_mut(teams, |t| t.id == id, "time", id)?;
                team.apply(patch);
                Ok(team.clone())
            })
            .await?;
        tracing::info!("Time '{}' atualizado.", id);
        Ok(team)
    }

    /// Soma uma vitória, derrota ou empate ao time.
    pub async fn record_team_result(&self, id: &str, resultado: MatchResult) -> AppResult<Team> {
        let team = self
            .mutate(keys::TEAMS, &self.teams, |teams| {
                let team = find_mut(teams, |t| t.id == id, "time", id)?;
                match resultado {
                    MatchResult::Vitoria => team.wins = team.wins.saturating_add(1),
                    MatchResult::Derrota => team.losses = team.losses.saturating_add(1),
                    MatchResult::Empate => team.draws = team.draws.saturating_add(1),
                }
                Ok(team.clone())
            })
            .await?;
        tracing::info!("Resultado {:?} registado para o time '{}'.", resultado, id);
        Ok(team)
    }

    /// Apaga o time. Os jogadores que o referem ficam com o `teamId` pendente.
    pub async fn delete_team(&self, id: &str) -> AppResult<()> {
        self.mutate(keys::TEAMS, &self.teams, |teams| {
            let antes = teams.len();
            teams.retain(|t| t.id != id);
            if teams.len() == antes {
                return Err(AppError::NotFound(format!("time {id}")));
            }
            Ok(())
        })
        .await?;
        tracing::info!("🗑️ Time '{}' apagado.", id);
        Ok(())
    }

    pub async fn team_summaries(&self, sport: Option<&str>) -> Vec<TeamSummary> {
        let teams = match sport {
            Some(sport) => self.get_teams_by_sport(sport).await,
            None => self.teams().await,
        };
        let players = self.players.read().await;
        teams
            .into_iter()
            .map(|team| {
                let players_count = players.iter().filter(|p| p.team_id == team.id).count();
                TeamSummary::new(team, players_count)
            })
            .collect()
    }

    pub async fn get_teams_by_sport(&self, sport: &str) -> Vec<Team> {
        self.teams
            .read()
            .await
            .iter()
            .filter(|t| same_sport(&t.sport, sport))
            .cloned()
            .collect()
    }

    // --- Jogadores ---

    pub async fn players(&self) -> Vec<Player> {
        self.players.read().await.clone()
    }

    pub async fn find_player(&self, id: &str) -> Option<Player> {
        self.players.read().await.iter().find(|p| p.id == id).cloned()
    }

    /// Jogador ligado a um utilizador atleta.
    pub async fn get_player_by_user(&self, user_id: &str) -> Option<Player> {
        self.players
            .read()
            .await
            .iter()
            .find(|p| p.user_id.as_deref() == Some(user_id))
            .cloned()
    }

    pub async fn add_player(&self, new: NewPlayer) -> AppResult<Player> {
        new.validate()?;
        let now = Utc::now();
        let player = Player {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            sport: new.sport.trim().to_string(),
            position: new.position.trim().to_string(),
            team_id: new.team_id.trim().to_string(),
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
            stats: Default::default(),
            profile: new.profile.unwrap_or_default(),
            feedbacks: Vec::new(),
        };
        let novo = player.clone();
        self.mutate(keys::PLAYERS, &self.players, move |players| {
            players.push(novo);
            Ok(())
        })
        .await?;
        tracing::info!("✅ Jogador '{}' criado ({}).", player.name, player.id);
        Ok(player)
    }

    /// Relê a coleção gravada e confirma que o jogador lá está, regravando se preciso.
    pub async fn confirm_player_stored(&self, id: &str) -> AppResult<()> {
        let storage = &self.storage;
        let players = &self.players;
        retry::with_retry(storage.retry_policy(), "Confirmação do jogador", move || async move {
            // Guarda de escrita presa até ao fim da regravação
            let memoria = players.write().await;
            let gravados: Vec<Player> = storage.get_list(keys::PLAYERS).await?;
            if gravados.iter().any(|p| p.id == id) {
                return Ok(());
            }
            tracing::warn!("Jogador '{}' ausente do armazenamento; regravando coleção.", id);
            storage.set_json(keys::PLAYERS, &*memoria).await?;
            Err(retry::unconfirmed_write(keys::PLAYERS))
        })
        .await
    }

    /// Altera apenas os campos presentes no patch.
    pub async fn update_player(&self, id: &str, patch: PlayerPatch) -> AppResult<Player> {
        patch.validate()?;
        let player = self
            .mutate(keys::PLAYERS, &self.players, |players| {
                let player = find_mut(players, |p| p.id == id, "jogador", id)?;
                player.apply(patch);
                player.updated_at = Utc::now();
                Ok(player.clone())
            })
            .await?;
        tracing::info!("Jogador '{}' atualizado.", id);
        Ok(player)
    }

    pub async fn delete_player(&self, id: &str) -> AppResult<()> {
        self.mutate(keys::PLAYERS, &self.players, |players| {
            let antes = players.len();
            players.retain(|p| p.id != id);
            if players.len() == antes {
                return Err(AppError::NotFound(format!("jogador {id}")));
            }
            Ok(())
        })
        .await?;
        tracing::info!("🗑️ Jogador '{}' apagado.", id);
        Ok(())
    }

    pub async fn append_player_feedback(&self, id: &str, feedback: Feedback) -> AppResult<Player> {
        self.mutate(keys::PLAYERS, &self.players, |players| {
            let player = find_mut(players, |p| p.id == id, "jogador", id)?;
            player.feedbacks.push(feedback);
            player.updated_at = Utc::now();
            Ok(player.clone())
        })
        .await
    }

    /// Soma um registo de partida às estatísticas acumuladas do jogador.
    pub async fn apply_stat_record(&self, record: &StatRecord) -> AppResult<Player> {
        let id = record.player_id.as_str();
        self.mutate(keys::PLAYERS, &self.players, |players| {
            let player = find_mut(players, |p| p.id == id, "jogador", id)?;
            // Contadores saturam em u32::MAX
            let stats = &mut player.stats;
            stats.goals = stats.goals.saturating_add(record.goals);
            stats.assists = stats.assists.saturating_add(record.assists);
            stats.cards = stats.cards.saturating_add(record.cards);
            stats.games = stats.games.saturating_add(1);
            player.updated_at = Utc::now();
            Ok(player.clone())
        })
        .await
    }

    pub async fn get_players_by_team(&self, team_id: &str) -> Vec<Player> {
        self.players
            .read()
            .await
            .iter()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect()
    }

    pub async fn get_players_by_sport(&self, sport: &str) -> Vec<Player> {
        self.players
            .read()
            .await
            .iter()
            .filter(|p| same_sport(&p.sport, sport))
            .cloned()
            .collect()
    }

    /// Nome do time do jogador; `None` sem time ou com time apagado.
    pub async fn team_name_for_player(&self, player: &Player) -> Option<String> {
        if !player.has_team() {
            return None;
        }
        self.find_team(&player.team_id).await.map(|t| t.name)
    }

    pub async fn player_view(&self, player: Player) -> PlayerView {
        let team_name = self.team_name_for_player(&player).await;
        PlayerView { player, team_name }
    }

    // --- Eventos ---

    /// Todos os eventos, por ordem de início.
    pub async fn events(&self) -> Vec<Event> {
        let mut events = self.events.read().await.clone();
        events.sort_by_key(Event::starts_at);
        events
    }

    pub async fn find_event(&self, id: &str) -> Option<Event> {
        self.events.read().await.iter().find(|e| e.id == id).cloned()
    }

    pub async fn add_event(&self, new: NewEvent) -> AppResult<Event> {
        new.validate()?;
        let event = Event {
            id: Uuid::new_v4().to_string(),
            title: new.title.trim().to_string(),
            event_type: new.event_type,
            sport: new.sport.trim().to_string(),
            date: new.date,
            time: new.time,
            description: new.description,
            location: new.location.filter(|l| !l.trim().is_empty()),
            team_id: new.team_id.filter(|t| !t.is_empty()),
            created_at: Utc::now(),
        };
        let novo = event.clone();
        self.mutate(keys::EVENTS, &self.events, move |events| {
            events.push(novo);
            Ok(())
        })
        .await?;
        tracing::info!("✅ Evento '{}' agendado para {} {}.", event.title, event.date, event.time);
        Ok(event)
    }

    pub async fn update_event(&self, id: &str, patch: EventPatch) -> AppResult<Event> {
        patch.validate()?;
        let event = self
            .mutate(keys::EVENTS, &self.events, |events| {
                let event = find_mut(events, |e| e.id == id, "evento", id)?;
                event.apply(patch);
                Ok(event.clone())
            })
            .await?;
        tracing::info!("Evento '{}' atualizado.", id);
        Ok(event)
    }

    pub async fn delete_event(&self, id: &str) -> AppResult<()> {
        self.mutate(keys::EVENTS, &self.events, |events| {
            let antes = events.len();
            events.retain(|e| e.id != id);
            if events.len() == antes {
                return Err(AppError::NotFound(format!("evento {id}")));
            }
            Ok(())
        })
        .await?;
        tracing::info!("🗑️ Evento '{}' apagado.", id);
        Ok(())
    }

    /// Eventos do dia corrente (hora local).
    pub async fn get_today_events(&self) -> Vec<Event> {
        self.events_on(Local::now().date_naive()).await
    }

    pub async fn events_on(&self, dia: NaiveDate) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.date == dia)
            .cloned()
            .collect();
        events.sort_by_key(Event::starts_at);
        events
    }

    /// Eventos que começam depois de agora, do mais próximo para o mais distante.
    pub async fn get_upcoming_events(&self) -> Vec<Event> {
        self.upcoming_events_after(Local::now().naive_local()).await
    }

    pub async fn upcoming_events_after(&self, agora: NaiveDateTime) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.starts_at() > agora)
            .cloned()
            .collect();
        events.sort_by_key(Event::starts_at);
        events
    }

    // --- Agregados ---

    pub async fn get_stats(&self) -> DashboardStats {
        self.stats_at(Local::now().naive_local()).await
    }

    pub async fn stats_at(&self, agora: NaiveDateTime) -> DashboardStats {
        let teams = self.teams.read().await;
        let players = self.players.read().await;
        let events = self.events.read().await;

        let mut times_por_esporte = BTreeMap::new();
        for team in teams.iter() {
            *times_por_esporte
                .entry(team.sport.trim().to_lowercase())
                .or_insert(0) += 1;
        }

        DashboardStats {
            total_times: teams.len(),
            total_jogadores: players.len(),
            total_eventos: events.len(),
            eventos_hoje: events.iter().filter(|e| e.date == agora.date()).count(),
            proximos_eventos: events.iter().filter(|e| e.starts_at() > agora).count(),
            total_gols: saturating_total(players.iter().map(|p| p.stats.goals)),
            total_assistencias: saturating_total(players.iter().map(|p| p.stats.assists)),
            total_jogos: saturating_total(players.iter().map(|p| p.stats.games)),
            times_por_esporte,
        }
    }
}

fn saturating_total(valores: impl Iterator<Item = u32>) -> u32 {
    valores.fold(0, u32::saturating_add)
}

fn find_mut<'a, T, P>(items: &'a mut [T], pred: P, entidade: &str, id: &str) -> AppResult<&'a mut T>
where
    P: FnMut(&&mut T) -> bool,
{
    items
        .iter_mut()
        .find(pred)
        .ok_or_else(|| AppError::NotFound(format!("{entidade} {id}")))
}
