//! Assessment prompt construction.
//!
//! The prompt instructs the model, in Portuguese, to grade a guitar
//! lesson from its transcript and to answer with a single JSON object.
//! Optional numbered sections 4 through 7 are appended per the caller's
//! analysis options; the numbering is fixed so disabling an option
//! leaves a gap rather than renumbering the rest.

use chrono::Utc;
use tutoria_models::AnalysisOptions;

/// Build the full Portuguese assessment prompt for one video.
///
/// `transcript` is the flattened caption text, `video_title` the display
/// title echoed into the reply template, and `model_name` the label used
/// in the `avaliador` field.
pub fn build_assessment_prompt(
    transcript: &str,
    video_url: &str,
    video_title: &str,
    options: &AnalysisOptions,
    model_name: &str,
) -> String {
    let today = Utc::now().date_naive();
    let extra_sections = extra_sections(options);

    format!(
        r#"Você é um especialista em pedagogia musical e análise de conteúdo de vídeo.
Sua tarefa é avaliar um vídeo tutorial de música do YouTube com base em sua transcrição.

Vídeo URL: {video_url}
Título: {video_title}
Transcrição do Vídeo:
--- START TRANSCRIPT ---
{transcript}
--- END TRANSCRIPT ---

Por favor, avalie o vídeo e retorne sua análise no formato JSON abaixo, preenchendo os campos `pontuacao` (1 a 5) e `observacoes`:

{{
  "avaliacaoVideo": "{video_title}",
  "urlVideo": "{video_url}",
  "dataAvaliacao": "{today}",
  "avaliador": "Gemini API ({model_name})",
  "pontosAvaliacao": {{
    "didaticaExplicacao": {{
      "pontuacao": null,
      "observacoes": "Avalie: Clareza na explicação das partes da música, estrutura do ensino (segmentação, introdução, prática lenta, conclusão), uso de exemplos, ritmo da aula, se facilita o aprendizado."
    }},
    "linguagemUtilizada": {{
      "pontuacao": null,
      "observacoes": "Avalie: Clareza da linguagem (evita jargões excessivos sem explicação?), objetividade, tom de voz (perceptível pela transcrição - ex: encorajador, monótono), adequação ao público alvo implícito, dicção (inferida pela clareza do texto)."
    }},
    "adequacaoNivel": {{
      "nivelEstimadoVideo": "Descreva o nível estimado (Ex: Iniciante, Intermediário, Avançado) com base na complexidade do conteúdo.",
      "complexidadeAcordes": {{
        "tipos": "Liste os tipos de acordes mencionados ou implícitos (Ex: Naturais, Com Pestana, Suspensos, etc.). Se não houver acordes (ex: baixo/solo), mencione isso.",
        "contagemAproximada": "Estime a quantidade (Ex: Poucos (1-4), Moderado (5-10), Muitos (10+), N/A)."
      }},
      "complexidadeTecnica": "Liste as técnicas principais ensinadas (Ex: Ritmo simples, Batidas complexas, Dedilhado, Tapping, Pizzicato, Palhetada, etc.).",
      "pontuacao": null,
      "observacoes": "Avalie se a complexidade (acordes, técnicas) ensinada e a didática utilizada são apropriadas para o nível estimado do vídeo. A dificuldade está bem balanceada com a forma de ensinar?"
    }}
  }},
  "pontuacaoGeral": null,
  "comentariosGerais": "Forneça um breve resumo geral da qualidade do vídeo como tutorial."
{extra_sections}}}

Instruções importantes:
1. Preencha TODOS os campos `pontuacao` com um número inteiro entre 1 e 5.
2. Preencha TODOS os campos descritivos com texto relevante e específico para a transcrição fornecida.
3. Retorne APENAS o objeto JSON completo, sem explicações adicionais."#
    )
}

fn extra_sections(options: &AnalysisOptions) -> String {
    let mut extra = String::new();

    if options.extract_chords {
        extra.push_str(
            r#"
4. Identifique TODOS os acordes mencionados na transcrição e adicione-os ao JSON:
   "acordesIdentificados": ["C", "Am", "F", "G", ...],
"#,
        );
    }

    if options.detect_instruments {
        extra.push_str(
            r#"
5. Identifique TODOS os instrumentos mencionados na transcrição e adicione-os ao JSON:
   "instrumentosIdentificados": ["Violão", "Guitarra", "Baixo", ...],
"#,
        );
    }

    if options.analyze_structure {
        extra.push_str(
            r#"
6. Analise a estrutura musical mencionada no vídeo:
   "estruturaMusical": {
      "partes": ["Intro", "Verso", "Refrão", ...],
      "progressao": "Descreva a progressão harmônica mencionada",
      "tonalidade": "Mencione a tonalidade da música, se identificada"
   },
"#,
        );
    }

    if options.extract_tablature {
        extra.push_str(
            r#"
7. Se houver menção a tablatura, adicione ao JSON:
   "tablatura": {
      "presente": true/false,
      "observacoes": "Descrição sobre a tablatura mencionada no vídeo"
   },
"#,
        );
    }

    extra
}
