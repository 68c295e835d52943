pub const DEFAULT_CONFIG_YAML: &str = r#"# ztools project bootstrap configuration.
# Every section is optional; a removed section falls back to the built-in defaults.

# Installed one at a time, in this order. Later packages may depend on earlier ones.
packages:
  - com.unity.addressables
  - com.unity.cinemachine
  - "git+https://github.com/deadwronggames/ZConstants.git"
  - "git+https://github.com/deadwronggames/ZUtils.git" # also installs com.unity.nuget.newtonsoft-json
  - "git+https://github.com/deadwronggames/ZCommon.git"
  - "git+https://github.com/deadwronggames/ZServices.git"
  - "git+https://github.com/deadwronggames/ZModularUI.git"

installer:
  poll_interval_ms: 10
  cooldown_ms: 1000

registry:
  url: "http://127.0.0.1:7070/v1"
  timeout_secs: 30
  # token: prefer ZTOOLS_REGISTRY_TOKEN over committing a token

assets:
  # cache_root: "/path/to/Asset Store-5.x"
  # cache_root_override: "D:/UnityCache"   # Windows only, replaces %APPDATA%/Unity
  # editor: "/Applications/Unity/Hub/Editor/6000.0.23f1/Unity.app/Contents/MacOS/Unity"
  packages:
    - name: "OdinInspectorValidatorSerializer_Education_v3.3.1.13.unitypackage"
      folder: "Sirenix/Education"
    - name: "Audio Preview Tool.unitypackage"
      folder: "Warped Imagination/Editor ExtensionsAudio"
    - name: "DOTween HOTween v2.unitypackage"
      folder: "Demigiant/Editor ExtensionsAnimation"

structure:
  project_folder: _Project
  # persistent_prefab: "Packages/com.deadwronggames.zservices/Runtime/Prefabs/PF_PersistentGO.prefab"
"#;
