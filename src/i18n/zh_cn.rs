// ============================================================================
// Minnow - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: minnow-i18n 工具界面的中文文本
// 边界:
//   - ✅ 中文翻译字符串定义
//   - ✅ 翻译键值对维护
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含其他语言翻译
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 目录加载
    ("catalog.using", "使用翻译目录 %1"),
    ("catalog.source_language", "语言设置 '%1' 没有对应的翻译目录，显示源文本"),
    ("catalog.load_failed", "加载翻译目录失败: %1"),
    // 查询相关
    ("lookup.fallback", "未找到翻译，显示源文本"),
    ("lookup.locations", "出处:"),
    ("lookup.no_location", "没有记录出处"),
    ("lookup.stale", "该条目已标记为 %1，不参与查询"),
    // 检查相关
    ("check.start", "开始检查翻译目录..."),
    ("check.no_locales", "没有找到需要检查的翻译目录"),
    ("check.invalid_pattern", "无效的 ignore_contexts 模式: %1"),
    ("check.catalog_header", "翻译目录 %1"),
    (
        "check.statistics",
        "%1 个上下文，%2 条消息（有效 %3，未完成 %4，过期 %5）",
    ),
    ("check.issue.unfinished", "翻译未完成"),
    ("check.issue.empty", "译文为空"),
    ("check.issue.placeholder", "占位符不一致（缺少: %1，多出: %2）"),
    ("check.issue.duplicate", "重复条目"),
    ("check.no_issues", "没有发现问题"),
    ("check.summary", "%1 个错误，%2 个警告"),
    ("check.all_good", "所有翻译目录检查通过"),
    ("check.failed", "翻译目录检查未通过"),
    // 格式化相关
    ("fmt.formatted", "已格式化 %1"),
    ("fmt.unchanged", "格式已规范: %1"),
    ("fmt.would_change", "需要重新格式化: %1"),
    ("fmt.check_failed", "%1 个文件需要格式化"),
    ("fmt.read_failed", "读取 %1 失败"),
    ("fmt.failed", "%1 个文件无法格式化"),
    // 列表相关
    ("list.header", "可用的翻译目录"),
    ("list.none", "没有可用的翻译目录"),
    (
        "list.row",
        "%1: %2 个上下文，%3 条消息（有效 %4，未完成 %5，过期 %6）",
    ),
    // 初始化相关
    ("init.start", "正在初始化 minnow-i18n 配置..."),
    ("init.config_exists", "配置文件已存在: %1"),
    ("init.use_force_hint", "使用 --force 覆盖已存在的配置文件"),
    ("init.config_created", "配置文件已创建: %1"),
    ("init.create_failed", "创建配置文件失败: %1"),
    ("init.next_steps", "现在可以编辑配置文件，指定翻译目录位置"),
];
