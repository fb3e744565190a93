//! Rendering of CMake toolchain and presets files.

use std::path::Path;

use serde_json::{json, Value};

use super::{ArchitectureBlock, ToolchainConfig};

/// File name of the generated toolchain file.
pub const TOOLCHAIN_FILE: &str = "rigging_toolchain.cmake";

/// File name of the generated presets file.
pub const PRESETS_FILE: &str = "CMakePresets.json";

/// File name of the user presets file at the source root.
pub const USER_PRESETS_FILE: &str = "CMakeUserPresets.json";

/// Variables that receive the machine flag.
const MACHINE_FLAG_VARS: [&str; 4] = [
    "CMAKE_C_FLAGS_INIT",
    "CMAKE_CXX_FLAGS_INIT",
    "CMAKE_SHARED_LINKER_FLAGS_INIT",
    "CMAKE_EXE_LINKER_FLAGS_INIT",
];

/// Quote a value for use inside a CMake string argument.
fn cmake_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' | '"' | '$' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render the toolchain file.
pub fn render_toolchain_file(config: &ToolchainConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n", TOOLCHAIN_FILE));
    out.push_str("# Generated by rigging. Local edits are overwritten on the next run.\n");
    out.push_str(&format!("# fingerprint: {}\n", config.fingerprint()));
    out.push_str("include_guard()\n\n");
    out.push_str("message(STATUS \"Using rigging toolchain: ${CMAKE_CURRENT_LIST_FILE}\")\n\n");

    out.push_str(&format!(
        "# Generator: {}\n",
        config.generator().as_str()
    ));
    out.push_str(&format!("# Architecture: {}\n", config.arch()));
    if let Some(build_type) = config.build_type() {
        out.push_str(&format!(
            "set(CMAKE_BUILD_TYPE {} CACHE STRING \"Choose the type of build.\" FORCE)\n\n",
            cmake_quote(build_type.as_str())
        ));
    } else {
        out.push('\n');
    }

    render_architecture(&mut out, config.architecture());

    // One append per flag, in emission order
    out.push_str("set(RIGGING_CXX_FLAGS \"\")\n");
    for flag in config.extra_compile_flags() {
        out.push_str(&format!(
            "string(APPEND RIGGING_CXX_FLAGS {})\n",
            cmake_quote(&format!(" {}", flag))
        ));
    }
    out.push_str("string(APPEND CMAKE_CXX_FLAGS_INIT \"${RIGGING_CXX_FLAGS}\")\n\n");

    let switch = if config.warnings_as_errors() { "ON" } else { "OFF" };
    out.push_str(&format!("set(CMAKE_COMPILE_WARNING_AS_ERROR {})\n\n", switch));

    if !config.defines().is_empty() {
        out.push_str("add_compile_definitions(\n");
        for define in config.defines() {
            out.push_str(&format!("    {}\n", cmake_quote(&define.as_definition())));
        }
        out.push_str(")\n\n");
    }

    out.push_str("list(PREPEND CMAKE_PREFIX_PATH \"${CMAKE_CURRENT_LIST_DIR}\")\n");
    out.push_str("list(PREPEND CMAKE_MODULE_PATH \"${CMAKE_CURRENT_LIST_DIR}\")\n");
    out.push_str("set(CMAKE_FIND_PACKAGE_PREFER_CONFIG ON)\n");

    out
}

fn render_architecture(out: &mut String, architecture: ArchitectureBlock) {
    match architecture {
        ArchitectureBlock::MachineFlag(flag) => {
            for var in MACHINE_FLAG_VARS {
                out.push_str(&format!(
                    "string(APPEND {} {})\n",
                    var,
                    cmake_quote(&format!(" {}", flag))
                ));
            }
            out.push('\n');
        }
        ArchitectureBlock::GeneratorPlatform(platform) => {
            out.push_str(&format!(
                "set(CMAKE_GENERATOR_PLATFORM {} CACHE STRING \"\" FORCE)\n\n",
                cmake_quote(platform)
            ));
        }
        ArchitectureBlock::OsxArchitectures(archs) => {
            out.push_str(&format!(
                "set(CMAKE_OSX_ARCHITECTURES {} CACHE STRING \"\" FORCE)\n\n",
                cmake_quote(archs)
            ));
        }
        ArchitectureBlock::Native => {}
    }
}

/// Render the presets file.
///
/// `build_dir` and `generators_dir` are written as given; pass absolute
/// paths so the presets work from any working directory.
pub fn render_presets(config: &ToolchainConfig, build_dir: &Path, generators_dir: &Path) -> Value {
    let name = match config.build_type() {
        Some(build_type) => build_type.as_str().to_ascii_lowercase(),
        None => "default".to_string(),
    };

    let mut configure = json!({
        "name": name,
        "displayName": format!("'{}' config", name),
        "generator": config.generator().as_str(),
        "binaryDir": build_dir.display().to_string(),
        "toolchainFile": generators_dir.join(TOOLCHAIN_FILE).display().to_string(),
        "cacheVariables": {},
    });

    if let Some(platform) = config.architecture().generator_platform() {
        configure["architecture"] = json!({ "value": platform, "strategy": "set" });
    }

    let build = match config.build_type() {
        Some(build_type) => {
            configure["cacheVariables"]["CMAKE_BUILD_TYPE"] = json!(build_type.as_str());
            json!({
                "name": name,
                "configurePreset": name,
            })
        }
        None => {
            // Multi-config trees pick the configuration at build time
            let configuration = config.configuration().as_str();
            json!({
                "name": configuration.to_ascii_lowercase(),
                "configurePreset": name,
                "configuration": configuration,
            })
        }
    };

    json!({
        "version": 3,
        "vendor": {
            "rigging": { "fingerprint": config.fingerprint() }
        },
        "cmakeMinimumRequired": { "major": 3, "minor": 24, "patch": 0 },
        "configurePresets": [configure],
        "buildPresets": [build],
    })
}

/// Render the user presets file that includes `include`.
///
/// Includes already listed in a file rigging wrote are kept, in order, when
/// `keep` accepts them; `include` is appended if missing. Returns `None` when the existing file belongs to someone
/// else or is not valid JSON.
pub fn render_user_presets(
    existing: Option<&str>,
    include: &str,
    keep: impl Fn(&str) -> bool,
) -> Option<Value> {
    let mut includes: Vec<String> = Vec::new();

    if let Some(text) = existing {
        let value: Value = serde_json::from_str(text).ok()?;
        value.get("vendor")?.get("rigging")?;
        if let Some(listed) = value.get("include").and_then(Value::as_array) {
            includes.extend(
                listed
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|path| *path == include || keep(path))
                    .map(str::to_string),
            );
        }
    }
    if !includes.iter().any(|path| path == include) {
        includes.push(include.to_string());
    }

    Some(json!({
        "version": 4,
        "vendor": { "rigging": {} },
        "include": includes,
    }))
}
