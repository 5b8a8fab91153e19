// src/templates.rs
use askama::Template; // Trait necessário para Askama

// Os campos de texto chegam já escapados para o formato de destino.

/// Linha de `estatisticas.csv`.
#[derive(Clone, Debug)]
pub struct LinhaCsv {
    pub id: String,
    pub nome: String,
    pub time: String,
    pub esporte: String,
    pub posicao: String,
    pub gols: u32,
    pub assistencias: u32,
    pub jogos: u32,
    pub cartoes: u32,
}

#[derive(Template)]
#[template(path = "estatisticas.csv", escape = "none")]
pub struct EstatisticasCsv {
    pub linhas: Vec<LinhaCsv>,
}

/// Um VEVENT de `agenda.ics`.
#[derive(Clone, Debug)]
pub struct EventoIcs {
    pub uid: String,
    pub dtstamp: String,
    pub dtstart: String,
    pub summary: String,
    pub categoria: String,
    pub description: String,
    pub location: String,
}

#[derive(Template)]
#[template(path = "agenda.ics", escape = "none")]
pub struct AgendaIcs {
    pub eventos: Vec<EventoIcs>,
}
