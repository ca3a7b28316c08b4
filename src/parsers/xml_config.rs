//! @ai:module:intent Check Maven and Gradle build files for test and coverage plugins
//! @ai:module:layer infrastructure
//! @ai:module:public_api verify_surefire_plugin, verify_jacoco_plugin, verify_gradle_test_task, verify_gradle_jacoco
//! @ai:module:stateless true
//!
//! pom.xml is parsed as XML. Gradle scripts are matched textually; Groovy and
//! Kotlin DSLs are never interpreted.

use super::{read_config, Verification};
use regex::Regex;
use std::path::Path;

/// @ai:intent Verified when an `artifactId` element mentions surefire
/// @ai:effects fs:read
pub fn verify_surefire_plugin(path: &Path) -> Verification {
    verify_pom_element(path, &["artifactId"], "surefire")
}

/// @ai:intent Verified when the pom references jacoco by groupId or artifactId
/// @ai:effects fs:read
pub fn verify_jacoco_plugin(path: &Path) -> Verification {
    verify_pom_element(path, &["artifactId", "groupId"], "jacoco")
}

/// @ai:intent Verified when a Gradle script declares or configures the `test` task
/// @ai:effects fs:read
pub fn verify_gradle_test_task(path: &Path) -> Verification {
    let content = match read_config(path) {
        Ok(content) => content,
        Err(verification) => return verification,
    };

    // `test { ... }`, `tasks.test`, `tasks.named('test')`, `tasks.withType(Test)`, `task test`
    let pattern = r#"(?m)^\s*test\s*\{|tasks\.test\b|tasks\.named\(\s*["']test["']|tasks\.withType\(\s*Test\b|\btask\s+test\b"#;
    let declared = Regex::new(pattern)
        .map(|re| re.is_match(&content))
        .unwrap_or(false);

    if declared {
        Verification::pass(format!("test task found in {}", path.display()))
    } else {
        Verification::fail(format!("test task not found in {}", path.display()))
    }
}

/// @ai:intent Verified when a Gradle script mentions jacoco, case-insensitively
/// @ai:effects fs:read
pub fn verify_gradle_jacoco(path: &Path) -> Verification {
    let content = match read_config(path) {
        Ok(content) => content,
        Err(verification) => return verification,
    };

    if content.to_lowercase().contains("jacoco") {
        Verification::pass(format!("jacoco found in {}", path.display()))
    } else {
        Verification::fail(format!("jacoco not found in {}", path.display()))
    }
}

fn verify_pom_element(path: &Path, elements: &[&str], needle: &str) -> Verification {
    let content = match read_config(path) {
        Ok(content) => content,
        Err(verification) => return verification,
    };

    let document = match roxmltree::Document::parse(&content) {
        Ok(document) => document,
        Err(e) => {
            return Verification::fail(format!("XML parse error in {}: {}", path.display(), e))
        }
    };

    let found = document.descendants().any(|node| {
        node.is_element()
            && elements.iter().any(|name| *name == node.tag_name().name())
            && node.text().is_some_and(|text| text.contains(needle))
    });

    if found {
        Verification::pass(format!("{needle} found in {}", path.display()))
    } else {
        Verification::fail(format!("{needle} not found in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <build>
    <plugins>
      <plugin>
        <groupId>org.apache.maven.plugins</groupId>
        <artifactId>maven-surefire-plugin</artifactId>
        <version>3.2.5</version>
      </plugin>
      <plugin>
        <groupId>org.jacoco</groupId>
        <artifactId>jacoco-maven-plugin</artifactId>
      </plugin>
    </plugins>
  </build>
</project>
"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_namespaced_pom_plugins() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "pom.xml", POM);

        assert!(verify_surefire_plugin(&path).verified);
        assert!(verify_jacoco_plugin(&path).verified);
    }

    #[test]
    fn test_pom_without_plugins() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "pom.xml",
            "<project><artifactId>demo</artifactId><description>no surefire here? only text</description></project>",
        );

        assert!(!verify_surefire_plugin(&path).verified);
        assert!(!verify_jacoco_plugin(&path).verified);
    }

    #[test]
    fn test_malformed_pom_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "pom.xml", "<project><build></project>");

        let result = verify_surefire_plugin(&path);
        assert!(!result.verified);
        assert!(result.message.contains("parse error"));
    }

    #[test]
    fn test_gradle_test_task() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "build.gradle",
            "plugins { id 'java' }\n\ntest {\n    useJUnitPlatform()\n}\n",
        );
        assert!(verify_gradle_test_task(&path).verified);

        let path = write(&temp, "build.gradle", "tasks.named('test') { useJUnitPlatform() }\n");
        assert!(verify_gradle_test_task(&path).verified);

        let path = write(&temp, "build.gradle", "dependencies { testImplementation 'junit:junit:4.13' }\n");
        assert!(!verify_gradle_test_task(&path).verified);
    }

    #[test]
    fn test_gradle_jacoco_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "build.gradle", "plugins { id 'JaCoCo' }\n");
        assert!(verify_gradle_jacoco(&path).verified);
    }

    #[test]
    fn test_missing_pom() {
        let temp = TempDir::new().unwrap();
        let result = verify_jacoco_plugin(&temp.path().join("pom.xml"));
        assert!(result.message.starts_with("File not found: "));
    }
}
