use maud::{html, Markup};

use crate::{
    catalog::{Exercise, Unit},
    names,
    services::progress::CompletionSummary,
    session::AnswerStatus,
    views::components::{glyph, nav_link},
};

/// Close button, progress bar and running score shown on every lesson screen.
fn topbar(progress_pct: usize, score: u32) -> Markup {
    html! {
        div."lesson-topbar" {
            button."lesson-close outline secondary"
                hx-post=(names::LESSON_CANCEL_URL)
                hx-confirm="¿Abandonar la lección? El progreso no se guarda."
                hx-swap="none"
                aria-label="Abandonar lección" {
                (glyph("close"))
            }
            progress."lesson-progress" value=(progress_pct) max="100" {}
            span."lesson-score" { (glyph("star")) " " (score) }
        }
    }
}

pub fn theory(unit: &Unit) -> Markup {
    html! {
        (topbar(0, 0))
        section."lesson-theory" {
            header."lesson-theory-header" {
                small { "Unidad " (unit.id.trim_start_matches("unit-")) }
                h1 { (unit.title) }
                p { (unit.core_concept) }
            }

            @if !unit.vocabulary.is_empty() {
                article."theory-card" {
                    h3 { (glyph("menu_book")) " Vocabulario Clave" }
                    div."vocab-chips" {
                        @for word in &unit.vocabulary {
                            span."vocab-chip" { (word) }
                        }
                    }
                }
            }

            @if let Some(grammar) = &unit.grammar {
                article."theory-card" {
                    h3 { (glyph("bolt")) " Power-Up Gramatical" }
                    p."grammar-formula" { code { (grammar) } }
                }
            }

            @if let Some(use_case) = &unit.use_case {
                article."theory-card" {
                    h3 { (glyph("chat_bubble")) " Ejemplo en Contexto" }
                    blockquote { (use_case) }
                }
            }

            @if let Some(challenge) = &unit.challenge {
                article."theory-card theory-challenge" {
                    h3 { (glyph("swords")) " Misión Activa" }
                    p { strong { (challenge) } }
                    p { small { "Completa esta misión para ganar XP extra." } }
                    button hx-post=(names::LESSON_PRACTICE_URL)
                           hx-target="main"
                           hx-swap="innerHTML" {
                        "Aceptar Desafío"
                    }
                }
            } @else {
                button hx-post=(names::LESSON_PRACTICE_URL)
                       hx-target="main"
                       hx-swap="innerHTML" {
                    "Comenzar Práctica"
                }
            }
        }
    }
}

pub struct PracticeData<'a> {
    pub exercise: &'a Exercise,
    pub index: usize,
    pub total: usize,
    pub score: u32,
    pub selection: Option<usize>,
    pub status: AnswerStatus,
}

pub fn practice(data: PracticeData) -> Markup {
    let progress_pct = if data.total == 0 {
        100
    } else {
        data.index * 100 / data.total
    };
    let answered = data.status != AnswerStatus::Unanswered;
    let is_final = data.index + 1 == data.total;

    html! {
        (topbar(progress_pct, data.score))
        section."lesson-practice" {
            p."practice-counter" {
                "Ejercicio " strong { (data.index + 1) } " de " (data.total)
            }
            h2 { (data.exercise.question) }

            div."practice-options" {
                @for (i, option) in data.exercise.options.iter().enumerate() {
                    @let is_selected = data.selection == Some(i);
                    @let css_class = if answered && i == data.exercise.correct_answer {
                        "practice-option option-correct"
                    } else if answered && is_selected {
                        "practice-option option-incorrect"
                    } else if is_selected {
                        "practice-option option-selected"
                    } else {
                        "practice-option"
                    };

                    @if answered {
                        button class=(css_class) disabled="true" { (option) }
                    } @else {
                        button class=(css_class)
                               hx-post=(names::select_option_url(i))
                               hx-target="main"
                               hx-swap="innerHTML" {
                            (option)
                        }
                    }
                }
            }

            footer."practice-footer" {
                @match data.status {
                    AnswerStatus::Unanswered => {
                        button."practice-check"
                            hx-post=(names::LESSON_CHECK_URL)
                            hx-target="main"
                            hx-swap="innerHTML"
                            disabled[data.selection.is_none()] {
                            "Comprobar"
                        }
                    },
                    AnswerStatus::Correct => {
                        div."practice-feedback feedback-correct" {
                            p { strong { "¡Correcto!" } }
                            @if let Some(explanation) = &data.exercise.explanation {
                                p { small { (explanation) } }
                            }
                        }
                        button."practice-continue"
                            hx-post=(names::LESSON_ADVANCE_URL)
                            hx-target="main"
                            hx-swap="innerHTML" {
                            @if is_final { "Finalizar" } @else { "Continuar" }
                        }
                    },
                    AnswerStatus::Incorrect => {
                        div."practice-feedback feedback-incorrect" {
                            p { strong { "Incorrecto" } }
                            p {
                                "La respuesta correcta es: "
                                (data.exercise.options[data.exercise.correct_answer])
                            }
                            @if let Some(explanation) = &data.exercise.explanation {
                                p { small { (explanation) } }
                            }
                        }
                        button."practice-continue secondary"
                            hx-post=(names::LESSON_ADVANCE_URL)
                            hx-target="main"
                            hx-swap="innerHTML" {
                            @if is_final { "Finalizar" } @else { "Continuar" }
                        }
                    }
                }
            }
        }
    }
}

pub struct ResultData<'a> {
    pub unit: &'a Unit,
    pub score: u32,
    pub total: usize,
}

pub fn result(data: ResultData) -> Markup {
    html! {
        (topbar(100, data.score))
        section."lesson-result" {
            span."result-trophy" { (glyph("trophy")) }
            h2 { "¡Misión Cumplida!" }
            p { "Has completado la unidad " mark { (data.unit.title) } "." }

            div."result-stats" {
                div."result-stat" {
                    div."result-stat-value" { (data.score) "/" (data.total) }
                    small { "Aciertos" }
                }
                div."result-stat" {
                    div."result-stat-value" { "+" (i64::from(data.score) * names::XP_PER_POINT) }
                    small { "XP" }
                }
            }

            button hx-post=(names::LESSON_SUBMIT_URL)
                   hx-target="main"
                   hx-swap="innerHTML" {
                "Continuar"
            }
        }
    }
}

pub struct SummaryData<'a> {
    pub unit_title: &'a str,
    pub summary: &'a CompletionSummary,
}

pub fn summary(data: SummaryData) -> Markup {
    let s = data.summary;
    html! {
        section."lesson-summary" {
            h2 { "¡Unidad Completada!" }
            p {
                "Has ganado " strong { (s.score * names::XP_PER_POINT) }
                " puntos de experiencia en " mark { (data.unit_title) } "."
            }

            div."summary-stats" {
                span."stat-chip" { (glyph("diamond")) " +" (s.gems_earned) " gemas" }
                span."stat-chip" { (glyph("diamond")) " " (s.gem_balance) " en total" }
                span."stat-chip" { (glyph("local_fire_department")) " racha de " (s.streak) }
            }

            @if s.completed {
                p."summary-verdict summary-passed" {
                    "Unidad superada. La siguiente lección te espera."
                }
            } @else {
                p."summary-verdict summary-failed" {
                    "Necesitas " (names::PASS_THRESHOLD)
                    " aciertos para superar la unidad. ¡Inténtalo de nuevo!"
                }
            }

            p { (nav_link(names::LEARN_URL, html! { "Volver a la ruta" })) }
        }
    }
}
