//! Locale resolution and the instruction text bundles for each locale.

use crate::git::CommitRecord;

/// Language of the generated prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    PtBr,
    Es,
    En,
}

impl Locale {
    /// Resolve a configured language tag.
    ///
    /// Exactly `pt-BR` selects Portuguese, any tag starting with `es` selects
    /// Spanish, and everything else (including no tag) selects English.
    pub fn resolve(language: Option<&str>) -> Self {
        match language {
            Some("pt-BR") => Locale::PtBr,
            Some(tag) if tag.starts_with("es") => Locale::Es,
            _ => Locale::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::Es => "es",
            Locale::En => "en-US",
        }
    }

    pub fn bundle(&self) -> &'static LocaleBundle {
        match self {
            Locale::PtBr => &PT_BR,
            Locale::Es => &ES,
            Locale::En => &EN,
        }
    }

    /// Marker appended after a truncated diff in PR prompts.
    pub fn omitted_marker(&self, omitted: usize) -> String {
        match self {
            Locale::PtBr => format!("... ({} linhas restantes omitidas)", omitted),
            Locale::Es => format!("... ({} líneas restantes omitidas)", omitted),
            Locale::En => format!("... ({} lines omitted)", omitted),
        }
    }

    /// Note appended when the commit list is longer than the prompt allows.
    pub fn more_commits(&self, remaining: usize) -> String {
        match self {
            Locale::PtBr => format!("... e mais {} commits", remaining),
            Locale::Es => format!("... y {} commits más", remaining),
            Locale::En => format!("... and {} more commits", remaining),
        }
    }

    /// Numbered commit line: `<n>. <shortId> - <subject> (by <author> on <date>)`.
    pub fn commit_line(&self, number: usize, commit: &CommitRecord) -> String {
        let (by, on) = match self {
            Locale::PtBr => ("por", "em"),
            Locale::Es => ("por", "el"),
            Locale::En => ("by", "on"),
        };
        format!(
            "{}. {} - {} ({} {} {} {})",
            number,
            commit.short_id,
            commit.subject,
            by,
            commit.author,
            on,
            self.format_date(commit)
        )
    }

    fn format_date(&self, commit: &CommitRecord) -> String {
        match self {
            Locale::PtBr | Locale::Es => commit.date.format("%d/%m/%Y").to_string(),
            Locale::En => commit.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Static instruction text for one locale.
#[derive(Debug)]
pub struct LocaleBundle {
    pub commit_opening: &'static str,
    pub summary_heading: &'static str,
    pub files_label: &'static str,
    pub insertions_label: &'static str,
    pub deletions_label: &'static str,
    pub changed_files_heading: &'static str,
    pub commit_diff_heading: &'static str,
    pub commit_instructions: &'static str,
    pub commit_closing: &'static str,

    pub pr_opening: &'static str,
    pub pr_info_heading: &'static str,
    pub current_branch_label: &'static str,
    pub target_branch_label: &'static str,
    pub total_commits_label: &'static str,
    pub added_lines_label: &'static str,
    pub removed_lines_label: &'static str,
    pub commits_heading: &'static str,
    pub pr_files_heading: &'static str,
    pub lines_word: &'static str,
    pub pr_diff_heading: &'static str,
    pub template_heading: &'static str,
    pub default_sections_heading: &'static str,
    pub default_sections: &'static str,
    pub instructions_heading: &'static str,
    pub title_instruction: &'static str,
    pub template_instruction: &'static str,
    pub sections_instruction: &'static str,
    pub pr_instructions: &'static str,
    pub response_format_heading: &'static str,
    pub response_format: &'static str,
}

static PT_BR: LocaleBundle = LocaleBundle {
    commit_opening: "Por favor, gere uma mensagem de commit concisa e descritiva baseada nas seguintes mudanças:",
    summary_heading: "RESUMO DAS MUDANÇAS:",
    files_label: "Arquivos modificados",
    insertions_label: "Linhas inseridas",
    deletions_label: "Linhas removidas",
    changed_files_heading: "ARQUIVOS ALTERADOS:",
    commit_diff_heading: "PREVIEW DAS MUDANÇAS (DIFF):",
    commit_instructions: "INSTRUÇÕES:
1. Gere uma mensagem de commit seguindo as convenções:
   - Use o formato: tipo(escopo): descrição
   - Tipos válidos: feat, fix, docs, style, refactor, test, chore
   - Mensagem deve ser em português
   - Máximo de 50 caracteres no título
   - Use presente do indicativo (ex: \"adiciona\", \"corrige\", \"atualiza\")

2. A mensagem deve ser clara e explicar O QUE foi feito, não COMO

3. Exemplos de boas mensagens:
   - feat(auth): adiciona autenticação via JWT
   - fix(api): corrige validação de entrada de dados
   - refactor(utils): simplifica função de formatação
   - docs(readme): atualiza instruções de instalação",
    commit_closing: "Responda APENAS com a mensagem de commit, sem explicações adicionais.",

    pr_opening: "Atue como especialista em desenvolvimento de software. Com base nas informações abaixo sobre mudanças em um repositório git, crie um título conciso e uma descrição detalhada para um Pull Request.",
    pr_info_heading: "**INFORMAÇÕES DO PULL REQUEST:**",
    current_branch_label: "Branch atual",
    target_branch_label: "Branch de destino",
    total_commits_label: "Total de commits",
    added_lines_label: "Linhas adicionadas",
    removed_lines_label: "Linhas removidas",
    commits_heading: "**COMMITS INCLUÍDOS:**",
    pr_files_heading: "**ARQUIVOS MODIFICADOS:**",
    lines_word: "linhas",
    pr_diff_heading: "**DIFERENÇAS (DIFF):**",
    template_heading: "**TEMPLATE DO PULL REQUEST:**",
    default_sections_heading: "**ESTRUTURA DA DESCRIÇÃO:**",
    default_sections: "#### Cenário
- Faça uma breve descrição sobre o cenário no qual é aplicado o contexto.

#### Problema
- Faça uma breve explanação sobre o que a sua alteração está resolvendo.

#### Solução
- Escreva o que foi feito para resolver o problema descrito acima.",
    instructions_heading: "**INSTRUÇÕES:**",
    title_instruction: "Crie um título conciso e descritivo para o PR (máximo 60 caracteres)",
    template_instruction: "Preencha a descrição seguindo exatamente a estrutura do template fornecido",
    sections_instruction: "Escreva a descrição com exatamente três seções: Cenário, Problema e Solução",
    pr_instructions: "Base-se nas informações dos commits e arquivos modificados
Use linguagem clara e objetiva
Foque no valor de negócio e no impacto da mudança
Responda em português brasileiro",
    response_format_heading: "**FORMATO DA RESPOSTA:**",
    response_format: "Título: [seu título aqui]

Descrição:
[sua descrição aqui]",
};

static ES: LocaleBundle = LocaleBundle {
    commit_opening: "Por favor, genera un mensaje de commit conciso y descriptivo basado en los siguientes cambios:",
    summary_heading: "RESUMEN DE LOS CAMBIOS:",
    files_label: "Archivos modificados",
    insertions_label: "Líneas insertadas",
    deletions_label: "Líneas eliminadas",
    changed_files_heading: "ARCHIVOS CAMBIADOS:",
    commit_diff_heading: "VISTA PREVIA DE LOS CAMBIOS (DIFF):",
    commit_instructions: "INSTRUCCIONES:
1. Genera un mensaje de commit siguiendo las convenciones:
   - Usa el formato: tipo(alcance): descripción
   - Tipos válidos: feat, fix, docs, style, refactor, test, chore
   - El mensaje debe estar en español
   - Máximo de 50 caracteres en el título
   - Usa el modo imperativo (ej: \"agrega\", \"corrige\", \"actualiza\")

2. El mensaje debe ser claro y explicar QUÉ se hizo, no CÓMO

3. Ejemplos de buenos mensajes:
   - feat(auth): agrega autenticación vía JWT
   - fix(api): corrige validación de datos de entrada
   - refactor(utils): simplifica función de formato
   - docs(readme): actualiza instrucciones de instalación",
    commit_closing: "Responde SOLO con el mensaje de commit, sin explicaciones adicionales.",

    pr_opening: "Actúa como especialista en desarrollo de software. Con base en la información siguiente sobre cambios en un repositorio git, crea un título conciso y una descripción detallada para un Pull Request.",
    pr_info_heading: "**INFORMACIÓN DEL PULL REQUEST:**",
    current_branch_label: "Rama actual",
    target_branch_label: "Rama de destino",
    total_commits_label: "Total de commits",
    added_lines_label: "Líneas agregadas",
    removed_lines_label: "Líneas eliminadas",
    commits_heading: "**COMMITS INCLUIDOS:**",
    pr_files_heading: "**ARCHIVOS MODIFICADOS:**",
    lines_word: "líneas",
    pr_diff_heading: "**DIFERENCIAS (DIFF):**",
    template_heading: "**PLANTILLA DEL PULL REQUEST:**",
    default_sections_heading: "**ESTRUCTURA DE LA DESCRIPCIÓN:**",
    default_sections: "#### Escenario
- Describe brevemente el escenario en el que se aplica el contexto.

#### Problema
- Explica brevemente qué resuelve tu cambio.

#### Solución
- Escribe lo que se hizo para resolver el problema descrito arriba.",
    instructions_heading: "**INSTRUCCIONES:**",
    title_instruction: "Crea un título conciso y descriptivo para el PR (máximo 60 caracteres)",
    template_instruction: "Completa la descripción siguiendo exactamente la estructura de la plantilla proporcionada",
    sections_instruction: "Escribe la descripción con exactamente tres secciones: Escenario, Problema y Solución",
    pr_instructions: "Básate en la información de los commits y archivos modificados
Usa un lenguaje claro y objetivo
Enfócate en el valor de negocio y en el impacto del cambio
Responde en español",
    response_format_heading: "**FORMATO DE LA RESPUESTA:**",
    response_format: "Título: [tu título aquí]

Descripción:
[tu descripción aquí]",
};

static EN: LocaleBundle = LocaleBundle {
    commit_opening: "Please generate a concise and descriptive commit message based on the following changes:",
    summary_heading: "CHANGE SUMMARY:",
    files_label: "Files changed",
    insertions_label: "Lines inserted",
    deletions_label: "Lines removed",
    changed_files_heading: "CHANGED FILES:",
    commit_diff_heading: "CHANGE PREVIEW (DIFF):",
    commit_instructions: "INSTRUCTIONS:
1. Generate a commit message following these conventions:
   - Use the format: type(scope): description
   - Valid types: feat, fix, docs, style, refactor, test, chore
   - The message must be in English
   - Maximum of 50 characters in the title
   - Use the imperative mood (e.g. \"add\", \"fix\", \"update\")

2. The message must be clear and explain WHAT was done, not HOW

3. Examples of good messages:
   - feat(auth): add JWT authentication
   - fix(api): fix input data validation
   - refactor(utils): simplify formatting function
   - docs(readme): update installation instructions",
    commit_closing: "Respond ONLY with the commit message, without additional explanations.",

    pr_opening: "Act as a software development expert. Based on the information below about changes in a git repository, create a concise title and a detailed description for a Pull Request.",
    pr_info_heading: "**PULL REQUEST INFORMATION:**",
    current_branch_label: "Current branch",
    target_branch_label: "Target branch",
    total_commits_label: "Total commits",
    added_lines_label: "Lines added",
    removed_lines_label: "Lines removed",
    commits_heading: "**INCLUDED COMMITS:**",
    pr_files_heading: "**CHANGED FILES:**",
    lines_word: "lines",
    pr_diff_heading: "**DIFFERENCES (DIFF):**",
    template_heading: "**PULL REQUEST TEMPLATE:**",
    default_sections_heading: "**DESCRIPTION STRUCTURE:**",
    default_sections: "#### Scenario
- Briefly describe the scenario in which the context applies.

#### Problem
- Briefly explain what your change is solving.

#### Solution
- Describe what was done to solve the problem above.",
    instructions_heading: "**INSTRUCTIONS:**",
    title_instruction: "Create a concise and descriptive title for the PR (maximum 60 characters)",
    template_instruction: "Fill in the description following exactly the structure of the provided template",
    sections_instruction: "Write the description with exactly three sections: Scenario, Problem and Solution",
    pr_instructions: "Base it on the commit and changed file information
Use clear and objective language
Focus on business value and the impact of the change
Respond in English",
    response_format_heading: "**RESPONSE FORMAT:**",
    response_format: "Title: [your title here]

Description:
[your description here]",
};
