// ==========================================
// 分切/印刷机生产配置引擎 - 条位排布
// ==========================================
// 规则: 宽度 L、拼版数 p 的子卷占用 p 条相邻且宽度均为 L 的条位
// 做法: 分切条宽按相同宽度切成连续段, 每种宽度内做小规模装箱 (回溯)
// ==========================================

use crate::domain::candidate::BobineFilleClichePose;
use serde::Serialize;

/// 宽度比较容差 (mm)
pub const EPSILON_LAIZE: f64 = 0.01;

pub fn laizes_egales(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON_LAIZE
}

/// 待排布的块: 一个子卷分配
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlocLaize {
    pub laize: f64,
    pub pose: u32,
}

impl From<&BobineFilleClichePose> for BlocLaize {
    fn from(variante: &BobineFilleClichePose) -> Self {
        Self {
            laize: variante.laize,
            pose: variante.pose,
        }
    }
}

/// 排布结果: 每个块的起始条位下标 (与输入块顺序一致)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementLaizes {
    pub premieres_laizes: Vec<usize>,
}

/// 相同宽度的连续条位段
#[derive(Debug, Clone, Copy)]
struct Segment {
    debut: usize,
    longueur: usize,
    laize: f64,
}

fn segments(laizes: &[f64]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for (i, laize) in laizes.iter().enumerate() {
        match segments.last_mut() {
            Some(seg) if laizes_egales(seg.laize, *laize) => seg.longueur += 1,
            _ => segments.push(Segment {
                debut: i,
                longueur: 1,
                laize: *laize,
            }),
        }
    }
    segments
}

struct Recherche<'a> {
    segments: Vec<Segment>,
    occupes: Vec<usize>,
    blocs: &'a [BlocLaize],
    ordre: Vec<usize>,
    debuts: Vec<usize>,
}

impl Recherche<'_> {
    fn placer(&mut self, rang: usize) -> bool {
        let Some(&indice) = self.ordre.get(rang) else {
            return true;
        };
        let bloc = self.blocs[indice];
        let pose = bloc.pose as usize;

        for s in 0..self.segments.len() {
            let seg = self.segments[s];
            let libre = seg.longueur - self.occupes[s];
            if !laizes_egales(seg.laize, bloc.laize) || libre < pose {
                continue;
            }
            // 同宽同余量的段等价, 只试第一个
            let doublon = (0..s).any(|t| {
                laizes_egales(self.segments[t].laize, seg.laize)
                    && self.segments[t].longueur - self.occupes[t] == libre
            });
            if doublon {
                continue;
            }

            self.debuts[indice] = seg.debut + self.occupes[s];
            self.occupes[s] += pose;
            if self.placer(rang + 1) {
                return true;
            }
            self.occupes[s] -= pose;
        }
        false
    }
}

/// 将块排入分切条位
///
/// # 返回
/// - Some(PlacementLaizes): 可行排布
/// - None: 条位不足或宽度不匹配
pub fn placer_blocs(laizes: &[f64], blocs: &[BlocLaize]) -> Option<PlacementLaizes> {
    let total_poses: usize = blocs.iter().map(|b| b.pose as usize).sum();
    if total_poses > laizes.len() {
        return None;
    }

    // 大块优先
    let mut ordre: Vec<usize> = (0..blocs.len()).collect();
    ordre.sort_by(|a, b| blocs[*b].pose.cmp(&blocs[*a].pose));

    let segments = segments(laizes);
    let mut recherche = Recherche {
        occupes: vec![0; segments.len()],
        segments,
        blocs,
        ordre,
        debuts: vec![0; blocs.len()],
    };

    if recherche.placer(0) {
        Some(PlacementLaizes {
            premieres_laizes: recherche.debuts,
        })
    } else {
        None
    }
}

pub fn blocs_compatibles(laizes: &[f64], blocs: &[BlocLaize]) -> bool {
    placer_blocs(laizes, blocs).is_some()
}
