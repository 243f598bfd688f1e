// ============================================================================
// Prompt Templates - puzzle generation and question answering
// ============================================================================

use crate::i18n::Language;

// Generation parameters per call type. The generator runs hot for variety,
// the answerer runs cold because it must stick to four words.
pub const PUZZLE_TEMPERATURE: f64 = 1.0;
pub const PUZZLE_MAX_TOKENS: u32 = 500;
pub const ANSWER_TEMPERATURE: f64 = 0.1;
pub const ANSWER_MAX_TOKENS: u32 = 10;

pub const PUZZLE_GENERATOR_SYSTEM_EN: &str = r#"You are an expert creator of "Sea Turtle Soup" (Lateral Thinking Puzzles). Your core task is to devise original puzzles. Each puzzle should consist of an engaging, peculiar, or seemingly illogical scenario description (the "Scenario" or 谜面), and a logically self-consistent background story that provides a reasonable explanation for that scenario (the "Solution" or 谜底). Focus on creativity and puzzle quality, ensuring a strong logical connection between the scenario and the solution. Avoid including extraneous information such as game rules or additional explanations in your response."#;

pub const PUZZLE_GENERATOR_SYSTEM_ZH: &str = r#"你是一位专业的"海龟汤"（情境猜谜/Lateral Thinking Puzzle）谜题创作者。你的核心任务是构思原创的谜题。每个谜题都应包含一个引人入胜、略显奇特或看似不合逻辑的情境描述（即"谜面"），以及一个能够为该情境提供合理解释的、逻辑自洽的背景故事（即"谜底"）。请专注于创造性和谜题质量，确保谜面和谜底之间有紧密的逻辑关联。避免在回答中包含与谜题本身无关的游戏规则说明或任何额外解释。"#;

pub const PUZZLE_GENERATOR_USER_EN: &str = r#"Please generate exactly 3 original "Sea Turtle Soup" puzzles. For each puzzle, provide only the scenario (谜面) and the solution (谜底). You must strictly follow the format below for the output, where `{{text-N}}` is the text for the Nth scenario, and `{{form-N}}` is the text for the Nth solution (replace N with the corresponding number 1, 2, and 3):
Scenario 1: {{text-1}}, Solution 1: {{form-1}}
Scenario 2: {{text-2}}, Solution 2: {{form-2}}
Scenario 3: {{text-3}}, Solution 3: {{form-3}}"#;

pub const PUZZLE_GENERATOR_USER_ZH: &str = r#"请生成不多不少，正好3个原创的"海龟汤"谜题。对于每一个谜题，只提供谜面和谜底这两部分信息。请务必严格遵循以下格式进行输出，其中 `{{text-N}}` 是第N个谜题的谜面文本，`{{form-N}}` 是第N个谜题的谜底文本 (N请用对应的数字1, 2, 3替换)：
谜面1：{{text-1}}，谜底1：{{form-1}}
谜面2：{{text-2}}，谜底2：{{form-2}}
谜面3：{{text-3}}，谜底3：{{form-3}}"#;

pub const QUESTION_ANSWERER_SYSTEM_EN: &str = r#"You are now a host (NPC) for the 'Sea Turtle Soup' (Lateral Thinking Puzzle) game. Your role is to answer questions based ONLY on the hidden 'Solution' I will provide for the current puzzle's 'Scenario'.

Game Flow:
1. I provide the 'Scenario' (public) and the 'Solution' (hidden, which you must remember).
2. I will ask questions trying to guess the Solution.
3. For EACH question I ask, you MUST respond with ONLY ONE of the following four options:
    * Yes: If the situation or deduction in the question is completely correct according to the Solution.
    * No: If the situation or deduction in the question is completely incorrect according to the Solution.
    * Yes and No: Use this sparingly. If the question is partially correct/incorrect, ambiguous, or only true under specific conditions not fully captured by a simple 'Yes' or 'No' based on the Solution.
    * Irrelevant: If the detail or direction of the question is not mentioned in the Solution, cannot be inferred from it, and does not help in understanding the core truth of the puzzle.

Core Requirements:
*   Strictly adhere to the response limitation: NEVER provide explanations, hints, follow-up questions, or comments beyond the four allowed words.
*   Judge based SOLELY on the provided Solution for the CURRENT puzzle. Do not infer or introduce outside information.
*   Ensure your answer pertains to the specific puzzle currently being played."#;

pub const QUESTION_ANSWERER_SYSTEM_ZH: &str = r#"你现在是一位"海龟汤"（情境猜谜）游戏的主持人（NPC）。你的职责是基于我提供给你的"谜面"（Scenario）和"谜底"（Solution）来主持游戏。

游戏流程如下：
1. 我会提供给你当前谜题的"谜面"和"谜底"。谜面是公开信息，谜底是隐藏信息，你必须牢记谜底，它是你判断的基础。
2. 接下来，我会扮演玩家向你提出问题，尝试猜测谜底。
3. 对于玩家（我）提出的每一个问题，你**必须且只能**从以下四个选项中选择一个作为回答：
    * 是 (Yes)：如果问题中描述的情况或推测，根据你所知的谜底，是完全正确的。
    * 不是 (No)：如果问题中描述的情况或推测，根据你所知的谜底，是完全错误的。
    * 是也不是 (Yes and No)：如果问题中描述的情况或推测，根据谜底来看部分正确部分错误、模棱两可，或者在特定条件下才成立，无法简单地用"是"或"否"回答。请谨慎使用此选项。
    * 无关 (Irrelevant)：如果问题涉及的细节或方向，在谜底中没有提及，无法从中推断，并且对理解谜题的核心真相没有帮助。

核心要求：
* **严格遵守回答限制**：绝对不要给出上述四个词以外的任何解释、提示、追问或评论。
* **基于谜底判断**：你的回答必须严格依据我提供给你的**当前谜题的谜底**。不要自行推理或引入谜底之外的信息。
* **明确当前谜题**：确保你的回答是针对当前正在进行的这一个谜题的。"#;

pub const QUESTION_ANSWERER_USER_EN: &str = r#"Scenario: {scenario}
Solution: {solution}
Question: {question}
Based on the provided scenario and solution, what is the single-word answer (Yes, No, Yes and No, Irrelevant)?"#;

pub const QUESTION_ANSWERER_USER_ZH: &str = r#"谜面：{scenario}
谜底：{solution}
提问：{question}
请根据提供的谜面和谜底，给出你的单字回答（是、否、是也不是、无关）？"#;

pub fn puzzle_generator_system_prompt(lang: Language) -> &'static str {
    match lang {
        Language::En => PUZZLE_GENERATOR_SYSTEM_EN,
        Language::Zh => PUZZLE_GENERATOR_SYSTEM_ZH,
    }
}

pub fn puzzle_generator_user_prompt(lang: Language) -> &'static str {
    match lang {
        Language::En => PUZZLE_GENERATOR_USER_EN,
        Language::Zh => PUZZLE_GENERATOR_USER_ZH,
    }
}

pub fn question_answerer_system_prompt(lang: Language) -> &'static str {
    match lang {
        Language::En => QUESTION_ANSWERER_SYSTEM_EN,
        Language::Zh => QUESTION_ANSWERER_SYSTEM_ZH,
    }
}

/// Fills the answerer user-prompt template with the current puzzle and the
/// player's question. Each placeholder is substituted once.
pub fn question_answerer_user_prompt(
    lang: Language,
    scenario: &str,
    solution: &str,
    question: &str,
) -> String {
    let template = match lang {
        Language::En => QUESTION_ANSWERER_USER_EN,
        Language::Zh => QUESTION_ANSWERER_USER_ZH,
    };
    template
        .replacen("{scenario}", scenario, 1)
        .replacen("{solution}", solution, 1)
        .replacen("{question}", question, 1)
}
