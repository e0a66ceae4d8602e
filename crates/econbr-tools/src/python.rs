use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::tool::Tool;

/// Imports prepended to submitted code when the matching library is
/// referenced but not imported.
const COMMON_IMPORTS: &[(&[&str], &str)] = &[
    (&["plt.", "pyplot"], "import matplotlib.pyplot as plt"),
    (&["sns.", "seaborn"], "import seaborn as sns"),
    (&["pd.", "DataFrame"], "import pandas as pd"),
    (&["np.", "numpy"], "import numpy as np"),
];

/// Code-execution sandbox: runs the agent's Python in a `python3` subprocess
/// bounded by a timeout. Used by the chart agent for data analysis and plots.
pub struct PythonReplTool {
    timeout: Duration,
}

impl PythonReplTool {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Tool for PythonReplTool {
    fn name(&self) -> &str {
        "python_repl"
    }

    fn description(&self) -> &str {
        "Executa código Python (matplotlib/seaborn/pandas) para análises e gráficos"
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let code = enhance_python_code(input);
        debug!(bytes = code.len(), "running python sandbox");

        let result = tokio::time::timeout(self.timeout, async {
            Command::new("python3").arg("-c").arg(&code).output().await
        })
        .await
        .map_err(|_| ToolError::Timeout(self.timeout.as_secs()))?
        .map_err(|e| ToolError::Sandbox(format!("falha ao iniciar python3: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            warn!(status = %result.status, "python sandbox failed");
            return Ok(format!(
                "Erro na execução: {}\n\nVerifique a sintaxe e tente novamente.",
                stderr.trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&result.stdout);
        let mut output = format!(
            "Código executado com sucesso:\n```python\n{code}\n```\n\nSaída: {}",
            stdout.trim()
        );

        if ["plt.show()", "plt.savefig"].iter().any(|k| input.contains(k)) {
            output.push_str("\n\n✅ Gráfico gerado. Responda com Final Answer se apropriado.");
        }

        Ok(output)
    }
}

/// Check whether `python3` is on the PATH.
pub async fn check_python_available() -> bool {
    match Command::new("python3").arg("--version").output().await {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}

/// Prepend imports for libraries the code references without importing.
pub fn enhance_python_code(code: &str) -> String {
    let mut needed = Vec::new();
    for (markers, import) in COMMON_IMPORTS {
        if markers.iter().any(|m| code.contains(m)) && !code.contains(import) {
            needed.push(*import);
        }
    }

    if needed.is_empty() {
        code.to_string()
    } else {
        format!("{}\n\n{}", needed.join("\n"), code)
    }
}
