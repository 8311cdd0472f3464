// ==========================================
// 井资产只读仓储 - 抽油杆钢级
// ==========================================
// 对齐: rods ⋈ rod_grades
// 自然键: (node_id, rod_num)
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RodGradeModel {
    pub node_id: String, // 节点 ID
    pub rod_num: i32,    // 抽油杆序号
    pub name: String,    // 钢级名称
}

// 排序: node_id 升序, 再按 rod_num 升序; 名称只用于稳定去重
impl Ord for RodGradeModel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node_id
            .cmp(&other.node_id)
            .then(self.rod_num.cmp(&other.rod_num))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for RodGradeModel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rod(node_id: &str, rod_num: i32, name: &str) -> RodGradeModel {
        RodGradeModel {
            node_id: node_id.to_string(),
            rod_num,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_sort_by_node_then_rod_number() {
        let mut rods = vec![rod("N2", 1, "D"), rod("N1", 10, "C"), rod("N1", 2, "K")];
        rods.sort();
        assert_eq!(rods, vec![rod("N1", 2, "K"), rod("N1", 10, "C"), rod("N2", 1, "D")]);
    }
}
