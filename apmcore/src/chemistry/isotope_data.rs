use crate::chemistry::constants::SECONDS_PER_YEAR;

const YEAR: f64 = SECONDS_PER_YEAR;
const DAY: f64 = 86_400.0;
const HOUR: f64 = 3_600.0;
const MINUTE: f64 = 60.0;

// (proton count, mass number, relative atomic mass in Da, natural abundance)
// NIST atomic weights and isotopic compositions
pub(crate) const ISOTOPES: &[(u16, u16, f64, f64)] = &[
    (1, 1, 1.00782503223, 0.999885),
    (1, 2, 2.01410177812, 0.000115),
    (2, 3, 3.0160293201, 0.00000134),
    (2, 4, 4.00260325413, 0.99999866),
    (3, 6, 6.0151228874, 0.0759),
    (3, 7, 7.0160034366, 0.9241),
    (4, 9, 9.012183065, 1.0),
    (5, 10, 10.01293695, 0.199),
    (5, 11, 11.00930536, 0.801),
    (6, 12, 12.0000000, 0.9893),
    (6, 13, 13.00335483507, 0.0107),
    (7, 14, 14.00307400443, 0.99636),
    (7, 15, 15.00010889888, 0.00364),
    (8, 16, 15.99491461957, 0.99757),
    (8, 17, 16.99913175650, 0.00038),
    (8, 18, 17.99915961286, 0.00205),
    (9, 19, 18.99840316273, 1.0),
    (10, 20, 19.9924401762, 0.9048),
    (10, 21, 20.993846685, 0.0027),
    (10, 22, 21.991385114, 0.0925),
    (11, 23, 22.9897692820, 1.0),
    (12, 24, 23.985041697, 0.7899),
    (12, 25, 24.985836976, 0.1000),
    (12, 26, 25.982592968, 0.1101),
    (13, 27, 26.98153853, 1.0),
    (14, 28, 27.97692653465, 0.92223),
    (14, 29, 28.97649466490, 0.04685),
    (14, 30, 29.973770136, 0.03092),
    (15, 31, 30.97376199842, 1.0),
    (16, 32, 31.9720711744, 0.9499),
    (16, 33, 32.9714589098, 0.0075),
    (16, 34, 33.967867004, 0.0425),
    (16, 36, 35.96708071, 0.0001),
    (17, 35, 34.968852682, 0.7576),
    (17, 37, 36.965902602, 0.2424),
    (18, 36, 35.967545105, 0.003336),
    (18, 38, 37.96273211, 0.000629),
    (18, 40, 39.9623831237, 0.996035),
    (19, 39, 38.9637064864, 0.932581),
    (19, 40, 39.963998166, 0.000117),
    (19, 41, 40.9618252579, 0.067302),
    (20, 40, 39.962590863, 0.96941),
    (20, 42, 41.95861783, 0.00647),
    (20, 43, 42.95876644, 0.00135),
    (20, 44, 43.95548156, 0.02086),
    (20, 46, 45.9536890, 0.00004),
    (20, 48, 47.95252276, 0.00187),
    (21, 45, 44.95590828, 1.0),
    (22, 46, 45.95262772, 0.0825),
    (22, 47, 46.95175879, 0.0744),
    (22, 48, 47.94794198, 0.7372),
    (22, 49, 48.94786568, 0.0541),
    (22, 50, 49.94478689, 0.0518),
    (23, 50, 49.94715601, 0.00250),
    (23, 51, 50.94395704, 0.99750),
    (24, 50, 49.94604183, 0.04345),
    (24, 52, 51.94050623, 0.83789),
    (24, 53, 52.94064815, 0.09501),
    (24, 54, 53.93887916, 0.02365),
    (25, 55, 54.93804391, 1.0),
    (26, 54, 53.93960899, 0.05845),
    (26, 56, 55.93493633, 0.91754),
    (26, 57, 56.93539284, 0.02119),
    (26, 58, 57.93327443, 0.00282),
    (27, 59, 58.93319429, 1.0),
    (28, 58, 57.93534241, 0.68077),
    (28, 60, 59.93078588, 0.26223),
    (28, 61, 60.93105557, 0.011399),
    (28, 62, 61.92834537, 0.036346),
    (28, 64, 63.92796682, 0.009255),
    (29, 63, 62.92959772, 0.6915),
    (29, 65, 64.92778970, 0.3085),
    (30, 64, 63.92914201, 0.4917),
    (30, 66, 65.92603381, 0.2773),
    (30, 67, 66.92712775, 0.0404),
    (30, 68, 67.92484455, 0.1845),
    (30, 70, 69.9253192, 0.0061),
    (31, 69, 68.9255735, 0.60108),
    (31, 71, 70.92470258, 0.39892),
    (32, 70, 69.92424875, 0.2057),
    (32, 72, 71.922075826, 0.2745),
    (32, 73, 72.923458956, 0.0775),
    (32, 74, 73.921177761, 0.3650),
    (32, 76, 75.921402726, 0.0773),
    (33, 75, 74.92159457, 1.0),
    (34, 74, 73.922475934, 0.0089),
    (34, 76, 75.919213704, 0.0937),
    (34, 77, 76.919914154, 0.0763),
    (34, 78, 77.91730928, 0.2377),
    (34, 80, 79.9165218, 0.4961),
    (34, 82, 81.9166995, 0.0873),
    (35, 79, 78.9183376, 0.5069),
    (35, 81, 80.9162897, 0.4931),
    (36, 78, 77.92036494, 0.00355),
    (36, 80, 79.91637808, 0.02286),
    (36, 82, 81.91348273, 0.11593),
    (36, 83, 82.91412716, 0.11500),
    (36, 84, 83.9114977282, 0.56987),
    (36, 86, 85.9106106269, 0.17279),
    (37, 85, 84.9117897379, 0.7217),
    (37, 87, 86.9091805310, 0.2783),
    (38, 84, 83.9134191, 0.0056),
    (38, 86, 85.9092606, 0.0986),
    (38, 87, 86.9088775, 0.0700),
    (38, 88, 87.9056125, 0.8258),
    (39, 89, 88.9058403, 1.0),
    (40, 90, 89.9046977, 0.5145),
    (40, 91, 90.9056396, 0.1122),
    (40, 92, 91.9050347, 0.1715),
    (40, 94, 93.9063108, 0.1738),
    (40, 96, 95.9082714, 0.0280),
    (41, 93, 92.9063730, 1.0),
    (42, 92, 91.90680796, 0.1453),
    (42, 94, 93.90508490, 0.0915),
    (42, 95, 94.90583877, 0.1584),
    (42, 96, 95.90467612, 0.1667),
    (42, 97, 96.90601812, 0.0960),
    (42, 98, 97.90540482, 0.2439),
    (42, 100, 99.9074718, 0.0982),
    (43, 97, 96.9063667, 0.0),
    (43, 98, 97.9072124, 0.0),
    (43, 99, 98.9062508, 0.0),
    (44, 96, 95.90759025, 0.0554),
    (44, 98, 97.9052868, 0.0187),
    (44, 99, 98.9059341, 0.1276),
    (44, 100, 99.9042143, 0.1260),
    (44, 101, 100.9055769, 0.1706),
    (44, 102, 101.9043441, 0.3155),
    (44, 104, 103.9054275, 0.1862),
    (45, 103, 102.9054980, 1.0),
    (46, 102, 101.9056022, 0.0102),
    (46, 104, 103.9040305, 0.1114),
    (46, 105, 104.9050796, 0.2233),
    (46, 106, 105.9034804, 0.2733),
    (46, 108, 107.9038916, 0.2646),
    (46, 110, 109.9051722, 0.1172),
    (47, 107, 106.9050916, 0.51839),
    (47, 109, 108.9047553, 0.48161),
    (48, 106, 105.9064599, 0.0125),
    (48, 108, 107.9041834, 0.0089),
    (48, 110, 109.90300661, 0.1249),
    (48, 111, 110.90418287, 0.1280),
    (48, 112, 111.90276287, 0.2413),
    (48, 113, 112.90440813, 0.1222),
    (48, 114, 113.90336509, 0.2873),
    (48, 116, 115.90476315, 0.0749),
    (49, 113, 112.90406184, 0.0429),
    (49, 115, 114.903878776, 0.9571),
    (50, 112, 111.90482387, 0.0097),
    (50, 114, 113.9027827, 0.0066),
    (50, 115, 114.903344699, 0.0034),
    (50, 116, 115.90174280, 0.1454),
    (50, 117, 116.90295398, 0.0768),
    (50, 118, 117.90160657, 0.2422),
    (50, 119, 118.90331117, 0.0859),
    (50, 120, 119.90220163, 0.3258),
    (50, 122, 121.9034438, 0.0463),
    (50, 124, 123.9052766, 0.0579),
    (51, 121, 120.9038120, 0.5721),
    (51, 123, 122.9042132, 0.4279),
    (52, 120, 119.9040593, 0.0009),
    (52, 122, 121.9030435, 0.0255),
    (52, 123, 122.9042698, 0.0089),
    (52, 124, 123.9028171, 0.0474),
    (52, 125, 124.9044299, 0.0707),
    (52, 126, 125.9033109, 0.1884),
    (52, 128, 127.90446128, 0.3174),
    (52, 130, 129.906222748, 0.3408),
    (53, 127, 126.9044719, 1.0),
    (54, 124, 123.9058920, 0.000952),
    (54, 126, 125.9042983, 0.000890),
    (54, 128, 127.9035310, 0.019102),
    (54, 129, 128.9047808611, 0.264006),
    (54, 130, 129.903509349, 0.040710),
    (54, 131, 130.90508406, 0.212324),
    (54, 132, 131.9041550856, 0.269086),
    (54, 134, 133.90539466, 0.104357),
    (54, 136, 135.907214484, 0.088573),
    (55, 133, 132.9054519610, 1.0),
    (56, 130, 129.9063207, 0.00106),
    (56, 132, 131.9050611, 0.00101),
    (56, 134, 133.90450818, 0.02417),
    (56, 135, 134.90568838, 0.06592),
    (56, 136, 135.90457573, 0.07854),
    (56, 137, 136.90582714, 0.11232),
    (56, 138, 137.90524700, 0.71698),
    (57, 138, 137.9071149, 0.0008881),
    (57, 139, 138.9063563, 0.9991119),
    (58, 136, 135.90712921, 0.00185),
    (58, 138, 137.905991, 0.00251),
    (58, 140, 139.9054431, 0.88450),
    (58, 142, 141.9092504, 0.11114),
    (59, 141, 140.9076576, 1.0),
    (60, 142, 141.9077290, 0.27152),
    (60, 143, 142.9098200, 0.12174),
    (60, 144, 143.9100930, 0.23798),
    (60, 145, 144.9125793, 0.08293),
    (60, 146, 145.9131226, 0.17189),
    (60, 148, 147.9168993, 0.05756),
    (60, 150, 149.9209022, 0.05638),
    (61, 145, 144.9127559, 0.0),
    (61, 147, 146.9151450, 0.0),
    (62, 144, 143.9120065, 0.0307),
    (62, 147, 146.9149044, 0.1499),
    (62, 148, 147.9148292, 0.1124),
    (62, 149, 148.9171921, 0.1382),
    (62, 150, 149.9172829, 0.0738),
    (62, 152, 151.9197397, 0.2675),
    (62, 154, 153.9222169, 0.2275),
    (63, 151, 150.9198578, 0.4781),
    (63, 153, 152.9212380, 0.5219),
    (64, 152, 151.9197995, 0.0020),
    (64, 154, 153.9208741, 0.0218),
    (64, 155, 154.9226305, 0.1480),
    (64, 156, 155.9221312, 0.2047),
    (64, 157, 156.9239686, 0.1565),
    (64, 158, 157.9241123, 0.2484),
    (64, 160, 159.9270624, 0.2186),
    (65, 159, 158.9253547, 1.0),
    (66, 156, 155.9242847, 0.00056),
    (66, 158, 157.9244159, 0.00095),
    (66, 160, 159.9252046, 0.02329),
    (66, 161, 160.9269405, 0.18889),
    (66, 162, 161.9268056, 0.25475),
    (66, 163, 162.9287383, 0.24896),
    (66, 164, 163.9291819, 0.28260),
    (67, 165, 164.9303288, 1.0),
    (68, 162, 161.9287884, 0.00139),
    (68, 164, 163.9292088, 0.01601),
    (68, 166, 165.9302995, 0.33503),
    (68, 167, 166.9320546, 0.22869),
    (68, 168, 167.9323767, 0.26978),
    (68, 170, 169.9354702, 0.14910),
    (69, 169, 168.9342179, 1.0),
    (70, 168, 167.9338896, 0.00123),
    (70, 170, 169.9347664, 0.02982),
    (70, 171, 170.9363302, 0.1409),
    (70, 172, 171.9363859, 0.2168),
    (70, 173, 172.9382151, 0.16103),
    (70, 174, 173.9388664, 0.32026),
    (70, 176, 175.9425764, 0.12996),
    (71, 175, 174.9407752, 0.97401),
    (71, 176, 175.9426897, 0.02599),
    (72, 174, 173.9400461, 0.0016),
    (72, 176, 175.9414076, 0.0526),
    (72, 177, 176.9432277, 0.1860),
    (72, 178, 177.9437058, 0.2728),
    (72, 179, 178.9458232, 0.1362),
    (72, 180, 179.9465570, 0.3508),
    (73, 180, 179.9474648, 0.0001201),
    (73, 181, 180.9479958, 0.9998799),
    (74, 180, 179.9467108, 0.0012),
    (74, 182, 181.94820394, 0.2650),
    (74, 183, 182.95022275, 0.1431),
    (74, 184, 183.95093092, 0.3064),
    (74, 186, 185.9543628, 0.2843),
    (75, 185, 184.9529545, 0.3740),
    (75, 187, 186.9557501, 0.6260),
    (76, 184, 183.9524885, 0.0002),
    (76, 186, 185.9538350, 0.0159),
    (76, 187, 186.9557474, 0.0196),
    (76, 188, 187.9558352, 0.1324),
    (76, 189, 188.9581442, 0.1615),
    (76, 190, 189.9584437, 0.2626),
    (76, 192, 191.9614770, 0.4078),
    (77, 191, 190.9605893, 0.373),
    (77, 193, 192.9629216, 0.627),
    (78, 190, 189.9599297, 0.00012),
    (78, 192, 191.9610387, 0.00782),
    (78, 194, 193.9626809, 0.3286),
    (78, 195, 194.9647917, 0.3378),
    (78, 196, 195.96495209, 0.2521),
    (78, 198, 197.9678949, 0.07356),
    (79, 197, 196.96656879, 1.0),
    (80, 196, 195.9658326, 0.0015),
    (80, 198, 197.96676860, 0.0997),
    (80, 199, 198.96828064, 0.1687),
    (80, 200, 199.96832659, 0.2310),
    (80, 201, 200.97030284, 0.1318),
    (80, 202, 201.97064340, 0.2986),
    (80, 204, 203.97349398, 0.0687),
    (81, 203, 202.9723446, 0.2952),
    (81, 205, 204.9744278, 0.7048),
    (82, 204, 203.9730440, 0.014),
    (82, 206, 205.9744657, 0.241),
    (82, 207, 206.9758973, 0.221),
    (82, 208, 207.9766525, 0.524),
    (83, 209, 208.9803991, 1.0),
    (84, 209, 208.9824308, 0.0),
    (84, 210, 209.9828741, 0.0),
    (85, 210, 209.9871479, 0.0),
    (85, 211, 210.9874966, 0.0),
    (86, 222, 222.0175782, 0.0),
    (87, 223, 223.0197360, 0.0),
    (88, 226, 226.0254103, 0.0),
    (88, 228, 228.0310707, 0.0),
    (89, 227, 227.0277523, 0.0),
    (90, 230, 230.0331341, 0.0),
    (90, 232, 232.0380558, 1.0),
    (91, 231, 231.0358842, 1.0),
    (92, 234, 234.0409523, 0.000054),
    (92, 235, 235.0439301, 0.007204),
    (92, 238, 238.0507884, 0.992742),
    (93, 237, 237.0481736, 0.0),
    (94, 239, 239.0521636, 0.0),
    (94, 244, 244.0642053, 0.0),
];

// (proton count, mass number, half-life in seconds), every isotope not listed is stable
// values above OBSERVATIONALLY_STABLE_HALF_LIFE are treated as stable by the isotope table
pub(crate) const HALF_LIVES: &[(u16, u16, f64)] = &[
    (19, 40, 1.248e9 * YEAR),
    (20, 48, 6.4e19 * YEAR),
    (23, 50, 2.71e17 * YEAR),
    (32, 76, 1.8e21 * YEAR),
    (34, 82, 9.7e19 * YEAR),
    (36, 78, 9.2e21 * YEAR),
    (37, 87, 4.97e10 * YEAR),
    (40, 96, 2.0e19 * YEAR),
    (42, 100, 7.1e18 * YEAR),
    (43, 97, 4.21e6 * YEAR),
    (43, 98, 4.2e6 * YEAR),
    (43, 99, 2.111e5 * YEAR),
    (48, 113, 8.04e15 * YEAR),
    (48, 116, 3.1e19 * YEAR),
    (49, 115, 4.41e14 * YEAR),
    (52, 128, 2.2e24 * YEAR),
    (52, 130, 7.9e20 * YEAR),
    (54, 124, 1.8e22 * YEAR),
    (54, 136, 2.2e21 * YEAR),
    (56, 130, 1.2e21 * YEAR),
    (57, 138, 1.02e11 * YEAR),
    (60, 144, 2.29e15 * YEAR),
    (60, 150, 9.1e18 * YEAR),
    (61, 145, 17.7 * YEAR),
    (61, 147, 2.6234 * YEAR),
    (62, 147, 1.06e11 * YEAR),
    (62, 148, 7.0e15 * YEAR),
    (63, 151, 5.0e18 * YEAR),
    (64, 152, 1.08e14 * YEAR),
    (71, 176, 3.76e10 * YEAR),
    (72, 174, 2.0e15 * YEAR),
    (74, 180, 1.8e18 * YEAR),
    (75, 187, 4.12e10 * YEAR),
    (76, 186, 2.0e15 * YEAR),
    (78, 190, 6.5e11 * YEAR),
    (83, 209, 2.01e19 * YEAR),
    (84, 209, 124.0 * YEAR),
    (84, 210, 138.376 * DAY),
    (85, 210, 8.1 * HOUR),
    (85, 211, 7.214 * HOUR),
    (86, 222, 3.8235 * DAY),
    (87, 223, 22.0 * MINUTE),
    (88, 226, 1600.0 * YEAR),
    (88, 228, 5.75 * YEAR),
    (89, 227, 21.772 * YEAR),
    (90, 230, 7.54e4 * YEAR),
    (90, 232, 1.40e10 * YEAR),
    (91, 231, 3.276e4 * YEAR),
    (92, 234, 2.455e5 * YEAR),
    (92, 235, 7.04e8 * YEAR),
    (92, 238, 4.468e9 * YEAR),
    (93, 237, 2.144e6 * YEAR),
    (94, 239, 2.411e4 * YEAR),
    (94, 244, 8.0e7 * YEAR),
];
