use maud::{html, Markup};

use crate::{names, views::components};

pub fn landing_page() -> Markup {
    html! {
        // Hero section
        section.landing-hero {
            h1 { "Aprende Inglés a la Velocidad de la Luz" }
            p.landing-hero-desc {
                "La plataforma gamificada que transforma el aprendizaje en una "
                "aventura espacial. Sube de nivel, gana recompensas y habla con fluidez."
            }
            div.landing-cta {
                a role="button" href=(names::REGISTER_URL) { "Empezar Gratis" }
                a role="button" href=(names::LOGIN_URL) class="outline" { "Entrar" }
            }
        }

        // Stats strip
        section.landing-stats {
            div.landing-stat {
                div.landing-stat-value { "50K+" }
                div.landing-stat-label { "Viajeros Activos" }
            }
            div.landing-stat {
                div.landing-stat-value { "4.9/5" }
                div.landing-stat-label { "Calificación" }
            }
            div.landing-stat {
                div.landing-stat-value { "200+" }
                div.landing-stat-label { "Misiones" }
            }
        }

        // Features section
        section.landing-features {
            h2 { "Tecnología de Otro Mundo" }
            div.landing-features-grid {
                article.landing-feature-card {
                    span."material-symbols-rounded landing-feature-icon" { "psychology" }
                    h3 { "AI Tutor Personal" }
                    p { "Tu copiloto de inteligencia artificial disponible 24/7 para practicar conversaciones reales." }
                }
                article.landing-feature-card {
                    span."material-symbols-rounded landing-feature-icon" { "bolt" }
                    h3 { "Gamificación Total" }
                    p { "Olvida los libros aburridos. Aquí ganas XP, mantienes rachas y desbloqueas logros." }
                }
                article.landing-feature-card {
                    span."material-symbols-rounded landing-feature-icon" { "mic" }
                    h3 { "Speech Recognition" }
                    p { "Nuestros sensores analizan tu pronunciación y te corrigen al instante." }
                }
            }
        }

        // Method section
        section.landing-method {
            h2 { "Tu Ruta de Vuelo" }
            div.landing-method-steps {
                article.landing-method-step {
                    div.landing-step-marker { "1" }
                    div {
                        h3 { "Evalúa tu Nivel" }
                        p { "Realiza un test de diagnóstico rápido para calibrar tu punto de partida en el mapa." }
                    }
                }
                article.landing-method-step {
                    div.landing-step-marker { "2" }
                    div {
                        h3 { "Completa Misiones" }
                        p { "Lecciones cortas y efectivas de 10 minutos. Teoría, práctica y juego combinados." }
                    }
                }
                article.landing-method-step {
                    div.landing-step-marker { "3" }
                    div {
                        h3 { "Derrota Jefes" }
                        p { "Al final de cada sección, demuestra lo aprendido en desafíos interactivos." }
                    }
                }
                article.landing-method-step {
                    div.landing-step-marker { "4" }
                    div {
                        h3 { "Obtén tu Certificado" }
                        p { "Desbloquea tu insignia de fluidez y certificado validado internacionalmente." }
                    }
                }
            }
        }

        // Pricing section
        section.landing-pricing {
            h2 { "Elige tu Nave" }
            div.landing-pricing-grid {
                article.landing-pricing-card {
                    h3 { "Explorador" }
                    div.landing-price { "Gratis" }
                    ul {
                        li { "5 corazones al día" }
                        li { "Lecciones básicas" }
                        li { "Acceso con publicidad" }
                    }
                    a role="button" class="secondary" href=(names::REGISTER_URL) { "Elegir" }
                }
                article."landing-pricing-card landing-pricing-featured" {
                    div.landing-pricing-badge { "MÁS POPULAR" }
                    h3 { "Astronauta" }
                    div.landing-price { "$9.99" small { "/mes" } }
                    ul {
                        li { "Vidas ilimitadas" }
                        li { "Sin anuncios" }
                        li { "Tutor AI ilimitado" }
                        li { "Práctica de pronunciación" }
                    }
                    a role="button" href=(names::REGISTER_URL) { "Despegar Ahora" }
                }
                article.landing-pricing-card {
                    h3 { "Comandante" }
                    div.landing-price { "$19.99" small { "/mes" } }
                    ul {
                        li { "Todo lo de Astronauta" }
                        li { "Certificados Premium" }
                        li { "Mentoría 1 a 1 mensual" }
                    }
                    a role="button" class="secondary" href=(names::REGISTER_URL) { "Elegir" }
                }
            }
        }

        // Bottom CTA
        section.landing-bottom-cta {
            h2 { "¿Listo para despegar?" }
            p { "Únete a miles de estudiantes que ya están transformando su futuro." }
            a role="button" href=(names::REGISTER_URL) { "Crear Cuenta Gratis" }
        }
    }
}

pub enum RegisterState {
    NoError,
    EmailTaken,
    EmptyFields,
}

pub fn register(state: RegisterState) -> Markup {
    let error_msg = match state {
        RegisterState::NoError => None,
        RegisterState::EmailTaken => Some("El correo ya está en uso."),
        RegisterState::EmptyFields => Some("Completa todos los campos."),
    };

    html! {
        h1 { "Crear perfil" }
        p { "Empieza tu aprendizaje en segundos." }
        article style="width: fit-content;" {
            form hx-post=(names::REGISTER_URL)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML"
                 hx-disabled-elt="find input, find button" {
                label {
                    "Nombre"
                    input name="display_name"
                          type="text"
                          autocomplete="name"
                          required="true"
                          placeholder="Nombre completo"
                          aria-label="Nombre completo";
                }
                label {
                    "Correo electrónico"
                    input name="email"
                          type="email"
                          autocomplete="email"
                          required="true"
                          placeholder="Correo electrónico"
                          aria-label="Correo electrónico";
                }
                label {
                    "Contraseña"
                    @if let Some(msg) = error_msg {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required="true"
                              placeholder="Crear contraseña"
                              aria-invalid="true"
                              aria-label="Contraseña";
                        small { (msg) }
                    } @else {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required="true"
                              placeholder="Crear contraseña"
                              aria-label="Contraseña";
                    }
                }
                button type="submit" { "Crear cuenta" }
            }
            p {
                "¿Ya tienes una cuenta? "
                (components::nav_link(names::LOGIN_URL, html! { "Entrar" }))
            }
        }
    }
}

pub enum LoginState {
    NoError,
    InvalidCredentials,
}

pub fn login(state: LoginState) -> Markup {
    html! {
        h1 { "¡Hora de aprender!" }
        p { "Continúa tu racha y alcanza el siguiente nivel hoy mismo." }
        article style="width: fit-content;" {
            form hx-post=(names::LOGIN_URL)
                 hx-ext="json-enc"
                 hx-target="main"
                 hx-swap="innerHTML"
                 hx-disabled-elt="find input, find button" {
                label {
                    "Correo o usuario"
                    input name="identifier"
                          type="text"
                          autocomplete="username"
                          required="true"
                          placeholder="Correo electrónico o usuario"
                          aria-label="Correo electrónico o usuario";
                }
                @match state {
                    LoginState::NoError => {
                        label {
                            "Contraseña"
                            input name="password"
                                  type="password"
                                  autocomplete="current-password"
                                  required="true"
                                  placeholder="Contraseña"
                                  aria-label="Contraseña";
                        }
                    },
                    LoginState::InvalidCredentials => {
                        label {
                            "Contraseña"
                            input name="password"
                                  type="password"
                                  autocomplete="current-password"
                                  required="true"
                                  placeholder="Contraseña"
                                  aria-invalid="true"
                                  aria-label="Contraseña";
                            small { "Correo o contraseña inválidos." }
                        }
                    }
                }
                button type="submit" { "Entrar ahora" }
            }
            p {
                "¿No tienes cuenta? "
                (components::nav_link(names::REGISTER_URL, html! { "Crear cuenta" }))
            }
            p."login-demo-hint" {
                small { "Demo: admin@example.com / admin" }
            }
        }
    }
}
