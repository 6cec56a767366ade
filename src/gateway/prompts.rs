// Instruction text for the five model operations

use crate::catalog::ActiveOption;

/// Shared ground rules for every script-producing call.
const SCRIPT_RULES: &str = "\
You are generating one part of a Linux hardening script in bash.

Rules:
- Target Debian/Ubuntu-family systems with systemd.
- Every change must be idempotent: check current state before modifying, \
skip work that is already done.
- Back up any file before the first modification to it, using the cp_backup \
helper defined in the script header.
- Use the log_step helper for progress messages; never echo raw ANSI codes.
- Return ONLY raw bash. No markdown, no code fences, no commentary outside \
of shell comments.";

pub fn header_prompt() -> String {
    format!(
        "{SCRIPT_RULES}\n\n\
         Generate the opening section of the script:\n\
         - a #!/usr/bin/env bash shebang and 'set -euo pipefail'\n\
         - a root privilege check that exits with a clear message\n\
         - helper functions log_step, cp_backup and require_command used by \
         later sections\n\
         Do not perform any hardening work in this section."
    )
}

pub fn section_prompt(option: &ActiveOption) -> String {
    format!(
        "{SCRIPT_RULES}\n\n\
         Generate the script section for this hardening task. Assume the \
         header with its helper functions already ran.\n\n\
         Task: {label}\n\
         Instructions: {prompt}\n\n\
         Start the section with a comment line naming the task.",
        label = option.label(),
        prompt = option.prompt(),
    )
}

pub fn footer_prompt() -> String {
    format!(
        "{SCRIPT_RULES}\n\n\
         Generate the closing section of the script. Assume all hardening \
         sections already ran. Print a completion summary via log_step and \
         remind the operator to review backed-up files. Do not call exit \
         with a non-zero status."
    )
}

pub fn analyze_prompt(output: &str) -> String {
    format!(
        "You are a Linux security auditor. The text below is captured \
         output from a hardening script run. Assess what was applied, what \
         failed, and what residual risk remains. Assign securityScore from \
         0 (nothing effective) to 100 (fully hardened).\n\n\
         Captured output:\n{output}"
    )
}

pub fn improve_prompt(script: &str, options: &[ActiveOption]) -> String {
    let mut task_list = String::new();
    for option in options {
        task_list.push_str(&format!(
            "- id: {id}\n  task: {label}\n  instructions: {prompt}\n",
            id = option.id(),
            label = option.label(),
            prompt = option.prompt(),
        ));
    }
    format!(
        "You are reviewing a generated Linux hardening script for defects: \
         non-idempotent steps, missing state checks, unsafe service \
         restarts, or tasks the instructions requested but the script does \
         not perform.\n\n\
         Return correctedScript as the full repaired script. For every task \
         whose instruction text caused a defect, include a refinedPrompts \
         entry with the same id and a rewritten instruction that would have \
         avoided it; omit tasks whose instructions were adequate. List each \
         concrete fix in improvementSummary.\n\n\
         Tasks the script was generated from:\n{task_list}\n\
         Script under review:\n{script}"
    )
}
