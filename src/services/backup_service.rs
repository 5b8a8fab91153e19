// src/services/backup_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        event::Event,
        player::Player,
        settings::AthleteSettings,
        user::PublicUser,
    },
    services::{app_data::AppData, profile_service},
    store::Storage,
    templates::{AgendaIcs, EstatisticasCsv, EventoIcs, LinhaCsv},
};
use askama::Template;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub const PERFIL_JSON: &str = "perfil.json";
pub const ESTATISTICAS_CSV: &str = "estatisticas.csv";
pub const AGENDA_ICS: &str = "agenda.ics";

/// Resumo devolvido depois de gravar o arquivo.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupResumo {
    pub arquivo: PathBuf,
    pub jogadores: usize,
    pub eventos: usize,
    pub bytes: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PerfilExport<'a> {
    usuario: &'a PublicUser,
    configuracoes: AthleteSettings,
    tem_foto: bool,
    gerado_em: DateTime<Utc>,
}

/// Gera `backup_<userId>_<timestamp>.zip` em `dir` com o perfil, as estatísticas
/// dos jogadores (CSV) e a agenda (ICS). O formato não serve para reimportar.
///
/// O professor exporta todos os jogadores; o atleta só o seu.
pub async fn create_backup(
    storage: &Storage,
    data: &AppData,
    user: &PublicUser,
    dir: &Path,
) -> AppResult<BackupResumo> {
    tracing::info!("💾 Gerando backup para {}", user.id);
    let agora = Utc::now();

    let perfil = PerfilExport {
        usuario: user,
        configuracoes: profile_service::get_settings(storage, &user.id).await?,
        tem_foto: profile_service::get_profile_image(storage, &user.id)
            .await?
            .is_some(),
        gerado_em: agora,
    };
    let perfil_json = serde_json::to_string_pretty(&perfil)?;

    let jogadores = if user.is_professor() {
        data.players().await
    } else {
        data.get_player_by_user(&user.id).await.into_iter().collect()
    };
    let mut linhas = Vec::with_capacity(jogadores.len());
    for player in &jogadores {
        let time = data.team_name_for_player(player).await.unwrap_or_default();
        linhas.push(csv_row(player, &time));
    }
    let csv = EstatisticasCsv { linhas }.render()?;

    let eventos = data.events().await;
    let ics = AgendaIcs {
        eventos: eventos.iter().map(|e| ics_event(e, agora)).collect(),
    }
    .render()?;

    tokio::fs::create_dir_all(dir).await?;
    let arquivo = dir.join(format!(
        "backup_{}_{}.zip",
        user.id,
        agora.format("%Y%m%d%H%M%S")
    ));

    let destino = arquivo.clone();
    let ficheiros = vec![
        (PERFIL_JSON, perfil_json),
        (ESTATISTICAS_CSV, csv),
        (AGENDA_ICS, ics),
    ];
    let bytes = tokio::task::spawn_blocking(move || write_zip(&destino, &ficheiros))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (write_zip): {:?}", e);
            AppError::InternalServerError
        })??;

    tracing::info!("✅ Backup gravado em {} ({} bytes).", arquivo.display(), bytes);
    Ok(BackupResumo {
        arquivo,
        jogadores: jogadores.len(),
        eventos: eventos.len(),
        bytes,
    })
}

fn write_zip(path: &Path, ficheiros: &[(&str, String)]) -> AppResult<u64> {
    let file = std::fs::File::create(path)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (nome, conteudo) in ficheiros {
        zip.start_file(*nome, options)?;
        zip.write_all(conteudo.as_bytes())?;
    }
    let file = zip.finish()?;
    Ok(file.metadata()?.len())
}

fn csv_row(player: &Player, time: &str) -> LinhaCsv {
    LinhaCsv {
        id: csv_field(&player.id),
        nome: csv_field(&player.name),
        time: csv_field(time),
        esporte: csv_field(&player.sport),
        posicao: csv_field(&player.position),
        gols: player.stats.goals,
        assistencias: player.stats.assists,
        jogos: player.stats.games,
        cartoes: player.stats.cards,
    }
}

fn ics_event(event: &Event, agora: DateTime<Utc>) -> EventoIcs {
    EventoIcs {
        uid: format!("{}@gestaotimes", event.id),
        dtstamp: agora.format("%Y%m%dT%H%M%SZ").to_string(),
        // Hora local "flutuante", sem fuso
        dtstart: event.starts_at().format("%Y%m%dT%H%M%S").to_string(),
        summary: ics_text(&event.title),
        categoria: event.event_type.label().to_uppercase(),
        description: ics_text(&event.description),
        location: ics_text(event.location.as_deref().unwrap_or_default()),
    }
}

/// Aspas só quando o campo tem separador, aspas ou quebra de linha.
pub fn csv_field(valor: &str) -> String {
    if valor.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", valor.replace('"', "\"\""))
    } else {
        valor.to_string()
    }
}

/// Escapa texto segundo as regras de TEXT do iCalendar.
pub fn ics_text(valor: &str) -> String {
    valor
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}
